// Character animation system
//
// Clips only know their timing. Frame counts come from the sprite sequence
// at draw time, so the same player drives any art set.

use std::collections::HashMap;

/// Timing for one named animation
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "run", "jump")
    pub name: String,
    /// Ticks each frame stays on screen
    pub frame_ticks: u32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    pub fn new(name: &str, frame_ticks: u32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_ticks: frame_ticks.max(1),
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_ticks: u32) -> Self {
        Self::new(name, frame_ticks, true)
    }

    /// Create a one-shot animation (holds its last frame)
    pub fn one_shot(name: &str, frame_ticks: u32) -> Self {
        Self::new(name, frame_ticks, false)
    }

    /// Frame to show after `elapsed` ticks of a sequence of `frame_count`
    pub fn frame_at(&self, elapsed: u32, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        let frame = (elapsed / self.frame_ticks) as usize;
        if self.looping {
            frame % frame_count
        } else {
            frame.min(frame_count - 1)
        }
    }
}

/// Manages animation playback for an entity
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    /// Sprite prefix, e.g. "player" for "player/idle"
    prefix: String,
    animations: HashMap<String, AnimationClip>,
    current_animation: String,
    /// Ticks since the current animation started
    elapsed: u32,
    flip_horizontal: bool,
}

impl AnimationPlayer {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            animations: HashMap::new(),
            current_animation: String::new(),
            elapsed: 0,
            flip_horizontal: false,
        }
    }

    /// Player animations: idle, run, jump and wall slide
    pub fn player() -> Self {
        let mut player = Self::new("player");
        player.add_animation(AnimationClip::looping("idle", 6));
        player.add_animation(AnimationClip::looping("run", 4));
        player.add_animation(AnimationClip::looping("jump", 5));
        player.add_animation(AnimationClip::looping("wall_slide", 5));
        player.play("idle");
        player
    }

    /// Enemy animations: idle and run
    pub fn enemy() -> Self {
        let mut player = Self::new("enemy");
        player.add_animation(AnimationClip::looping("idle", 6));
        player.add_animation(AnimationClip::looping("run", 4));
        player.play("idle");
        player
    }

    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Switch animation. Replaying the current one keeps its progress.
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.current_animation = name.to_string();
            self.elapsed = 0;
        }
    }

    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Asset name of the current animation, e.g. "enemy/run"
    pub fn sprite_name(&self) -> String {
        format!("{}/{}", self.prefix, self.current_animation)
    }

    /// Frame index into a sequence with `frame_count` frames
    pub fn frame_index(&self, frame_count: usize) -> usize {
        match self.animations.get(&self.current_animation) {
            Some(clip) => clip.frame_at(self.elapsed, frame_count),
            None => 0,
        }
    }
}
