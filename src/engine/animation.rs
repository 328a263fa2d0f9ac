// Sprite animation playback
//
// Plays frame-based clips keyed by any id type and reports lifecycle events
// (named frame events, completion) so game code can react in the same frame.

use std::collections::HashMap;
use std::hash::Hash;

/// A single animation clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    /// First sprite sheet frame of the clip
    pub first_frame: u32,
    /// Number of frames in the animation
    pub frame_count: u32,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    pub fn new(frame_count: u32, fps: f32, looping: bool) -> Self {
        Self {
            first_frame: 0,
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(frame_count: u32, fps: f32) -> Self {
        Self::new(frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once, then reports completion)
    pub fn one_shot(frame_count: u32, fps: f32) -> Self {
        Self::new(frame_count, fps, false)
    }

    /// Offset the clip into the sprite sheet
    pub fn with_first_frame(mut self, frame: u32) -> Self {
        self.first_frame = frame;
        self
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }

    pub fn last_frame(&self) -> u32 {
        self.first_frame + self.frame_count - 1
    }
}

/// Something that happened while advancing playback
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent<K> {
    /// A frame with a registered event name was entered
    Frame { name: String, clip: K, frame: u32 },
    /// A one-shot clip played its last frame to the end
    Completed(K),
}

/// Manages animation playback for one sprite
#[derive(Debug)]
pub struct AnimationPlayer<K> {
    /// All available animations
    clips: HashMap<K, AnimationClip>,
    /// Named events per clip, keyed by sprite sheet frame
    frame_events: HashMap<K, Vec<(u32, String)>>,
    current: Option<K>,
    /// Frame offset within the current clip
    current_frame: u32,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Events of the current frame were already reported
    frame_entered: bool,
    playing: bool,
    /// Playback speed multiplier (1.0 = normal)
    playback_speed: f32,
    flip_horizontal: bool,
}

impl<K: Copy + Eq + Hash> Default for AnimationPlayer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> AnimationPlayer<K> {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
            frame_events: HashMap::new(),
            current: None,
            current_frame: 0,
            frame_timer: 0.0,
            frame_entered: false,
            playing: false,
            playback_speed: 1.0,
            flip_horizontal: false,
        }
    }

    /// Add an animation clip
    pub fn add_clip(&mut self, key: K, clip: AnimationClip) {
        self.clips.insert(key, clip);
    }

    pub fn has_clip(&self, key: K) -> bool {
        self.clips.contains_key(&key)
    }

    /// Report `name` whenever playback of `key` enters sprite sheet `frame`
    pub fn register_frame_event(&mut self, key: K, frame: u32, name: impl Into<String>) {
        self.frame_events
            .entry(key)
            .or_default()
            .push((frame, name.into()));
    }

    /// Play an animation; keeps going if it is already playing
    pub fn play(&mut self, key: K) {
        if self.current != Some(key) {
            self.play_from_start(key);
        }
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, key: K) {
        self.current = Some(key);
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.frame_entered = false;
        self.playing = true;
    }

    /// Stop and reset the current animation
    pub fn stop(&mut self) {
        self.playing = false;
        self.current_frame = 0;
        self.frame_timer = 0.0;
    }

    /// Set playback speed (1.0 = normal, 2.0 = double speed)
    pub fn set_playback_speed(&mut self, speed: f32) {
        self.playback_speed = speed.max(0.0);
    }

    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Advance playback by `dt` seconds and collect what happened
    pub fn update(&mut self, dt: f32) -> Vec<PlaybackEvent<K>> {
        let mut events = Vec::new();
        if !self.playing {
            return events;
        }
        let Some(key) = self.current else {
            return events;
        };
        let Some(clip) = self.clips.get(&key).copied() else {
            return events;
        };

        if !self.frame_entered {
            self.frame_entered = true;
            self.collect_frame_events(key, &clip, &mut events);
        }

        self.frame_timer += dt * self.playback_speed;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;

            if self.current_frame + 1 < clip.frame_count {
                self.current_frame += 1;
            } else if clip.looping {
                self.current_frame = 0;
            } else {
                // Stay on last frame
                self.frame_timer = 0.0;
                self.playing = false;
                events.push(PlaybackEvent::Completed(key));
                break;
            }
            self.collect_frame_events(key, &clip, &mut events);
        }

        events
    }

    fn collect_frame_events(&self, key: K, clip: &AnimationClip, events: &mut Vec<PlaybackEvent<K>>) {
        let Some(registered) = self.frame_events.get(&key) else {
            return;
        };
        let frame = clip.first_frame + self.current_frame;
        for (event_frame, name) in registered {
            if *event_frame == frame {
                events.push(PlaybackEvent::Frame {
                    name: name.clone(),
                    clip: key,
                    frame,
                });
            }
        }
    }

    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Current sprite sheet frame
    pub fn current_frame(&self) -> u32 {
        self.current_clip()
            .map(|clip| clip.first_frame + self.current_frame.min(clip.frame_count - 1))
            .unwrap_or(0)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the current animation has finished (for non-looping animations)
    pub fn is_finished(&self) -> bool {
        match self.current_clip() {
            Some(clip) => !clip.looping && !self.playing,
            None => true,
        }
    }

    /// Get the clip info for the current animation
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.current.and_then(|key| self.clips.get(&key))
    }

    /// Get animation data for rendering (frame index and flip state)
    pub fn get_frame_data(&self) -> Option<AnimationFrameData<K>> {
        self.current.map(|clip| AnimationFrameData {
            clip,
            frame_index: self.current_frame(),
            flip_horizontal: self.flip_horizontal,
        })
    }
}

/// Data needed to render the current animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrameData<K> {
    pub clip: K,
    pub frame_index: u32,
    pub flip_horizontal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with(clip: AnimationClip) -> AnimationPlayer<&'static str> {
        let mut player = AnimationPlayer::new();
        player.add_clip("test", clip);
        player.play("test");
        player
    }

    #[test]
    fn test_animation_clip_creation() {
        let clip = AnimationClip::looping(4, 8.0);
        assert_eq!(clip.frame_count, 4);
        assert_eq!(clip.frame_duration, 0.125); // 1/8
        assert!(clip.looping);
        assert_eq!(clip.with_first_frame(10).last_frame(), 13);
    }

    #[test]
    fn test_animation_clip_duration() {
        let clip = AnimationClip::looping(6, 10.0);
        assert!((clip.total_duration() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_animation_player_update() {
        let mut player = player_with(AnimationClip::looping(4, 10.0));

        player.update(0.15); // 1.5 frames worth
        assert_eq!(player.current_frame(), 1);

        player.update(0.1);
        assert_eq!(player.current_frame(), 2);
    }

    #[test]
    fn test_animation_looping() {
        let mut player = player_with(AnimationClip::looping(3, 10.0));

        let events = player.update(0.35); // 3.5 frames
        assert_eq!(player.current_frame(), 0);
        assert!(player.is_playing());
        assert!(events.is_empty());
    }

    #[test]
    fn test_one_shot_completes_once() {
        let mut player = player_with(AnimationClip::one_shot(3, 10.0));

        let events = player.update(0.5);
        assert_eq!(events, vec![PlaybackEvent::Completed("test")]);
        assert_eq!(player.current_frame(), 2); // Last frame
        assert!(!player.is_playing());
        assert!(player.is_finished());

        assert!(player.update(0.5).is_empty());
    }

    #[test]
    fn test_frame_events() {
        let mut player = AnimationPlayer::new();
        player.add_clip("jump", AnimationClip::one_shot(10, 10.0).with_first_frame(5));
        player.register_frame_event("jump", 8, "launch");
        player.register_frame_event("jump", 5, "crouch");
        player.play("jump");

        // First frame reports on the first update
        let events = player.update(0.0);
        assert_eq!(
            events,
            vec![PlaybackEvent::Frame {
                name: "crouch".to_string(),
                clip: "jump",
                frame: 5
            }]
        );

        assert!(player.update(0.25).is_empty());
        let events = player.update(0.1);
        assert_eq!(
            events,
            vec![PlaybackEvent::Frame {
                name: "launch".to_string(),
                clip: "jump",
                frame: 8
            }]
        );
    }

    #[test]
    fn test_play_same_clip_keeps_progress() {
        let mut player = player_with(AnimationClip::looping(4, 10.0));
        player.update(0.25);
        player.play("test");
        assert_eq!(player.current_frame(), 2);

        player.play_from_start("test");
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_flip_horizontal() {
        let mut player = player_with(AnimationClip::looping(4, 10.0));
        assert!(!player.is_flipped_horizontal());

        player.set_flip_horizontal(true);
        let frame_data = player.get_frame_data().unwrap();
        assert!(frame_data.flip_horizontal);
        assert_eq!(frame_data.clip, "test");
    }

    #[test]
    fn test_playback_speed() {
        let mut player = player_with(AnimationClip::looping(4, 10.0));
        player.set_playback_speed(2.0);

        player.update(0.1); // Should advance 2 frames at 2x speed
        assert_eq!(player.current_frame(), 2);
    }
}
