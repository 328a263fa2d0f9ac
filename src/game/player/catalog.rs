// Animation catalog - static per-animation metadata
//
// Built once at startup. Construction validates every entry, repairs what it
// can so the controller keeps running, and precomputes the lookup indexes the
// selector needs each tick.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use super::state::JumpType;

/// Sprite sheet playback rate shared by all player animations
pub const ANIMATION_FRAME_RATE: f32 = 30.0;

/// Frame event name that releases a deferred jump launch
pub const JUMP_PHYSICS_EVENT: &str = "playerJumpPhysics";

/// Every animation the player can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationId {
    Idle,
    RunStart,
    RunLoop,
    RunStop,
    RunStopSlow,
    RunSwitch,
    WalkStart,
    WalkLoop,
    WalkStop,
    JumpNeutralStart,
    JumpNeutralFall,
    JumpNeutralLand,
    JumpForwardStart,
    JumpForwardFall,
    JumpForwardLand,
    RunJumpStart,
    RunJumpFall,
    RunJumpLandLight,
    RunJumpLandHeavy,
    RunJumpLandHeavyBackwards,
    RunJumpLandLightContinue,
    RunJumpLandHeavyContinue,
    RunJumpLandLightStop,
    RunJumpLandHeavyStop,
}

impl AnimationId {
    pub const ALL: [AnimationId; 24] = [
        Self::Idle,
        Self::RunStart,
        Self::RunLoop,
        Self::RunStop,
        Self::RunStopSlow,
        Self::RunSwitch,
        Self::WalkStart,
        Self::WalkLoop,
        Self::WalkStop,
        Self::JumpNeutralStart,
        Self::JumpNeutralFall,
        Self::JumpNeutralLand,
        Self::JumpForwardStart,
        Self::JumpForwardFall,
        Self::JumpForwardLand,
        Self::RunJumpStart,
        Self::RunJumpFall,
        Self::RunJumpLandLight,
        Self::RunJumpLandHeavy,
        Self::RunJumpLandHeavyBackwards,
        Self::RunJumpLandLightContinue,
        Self::RunJumpLandHeavyContinue,
        Self::RunJumpLandLightStop,
        Self::RunJumpLandHeavyStop,
    ];

    /// Sprite sheet frame prefix, also used as the playback key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RunStart => "run_start",
            Self::RunLoop => "run_loop",
            Self::RunStop => "run_stop",
            Self::RunStopSlow => "run_stop_slow",
            Self::RunSwitch => "run_switch",
            Self::WalkStart => "walk_start",
            Self::WalkLoop => "walk_loop",
            Self::WalkStop => "walk_stop",
            Self::JumpNeutralStart => "jump_neutral_start",
            Self::JumpNeutralFall => "jump_neutral_fall",
            Self::JumpNeutralLand => "jump_neutral_land",
            Self::JumpForwardStart => "jump_forward_start",
            Self::JumpForwardFall => "jump_forward_fall",
            Self::JumpForwardLand => "jump_forward_land",
            Self::RunJumpStart => "run_jump_start",
            Self::RunJumpFall => "run_jump_fall",
            Self::RunJumpLandLight => "run_jump_land_light",
            Self::RunJumpLandHeavy => "run_jump_land_heavy",
            Self::RunJumpLandHeavyBackwards => "run_jump_land_heavy_backwards",
            Self::RunJumpLandLightContinue => "run_jump_land_light_continue",
            Self::RunJumpLandHeavyContinue => "run_jump_land_heavy_continue",
            Self::RunJumpLandLightStop => "run_jump_land_light_stop",
            Self::RunJumpLandHeavyStop => "run_jump_land_heavy_stop",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Behavioural grouping. An animation may belong to several categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCategory {
    Idle,
    Running,
    Walking,
    Jumping,
    Falling,
    Landing,
    Stopping,
    Transitioning,
}

/// What plays after an animation completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAnimation {
    Fixed(AnimationId),
    /// Continue moving if input is still held, otherwise stop
    AccelerationBranch {
        accelerating: AnimationId,
        stopping: AnimationId,
    },
}

impl NextAnimation {
    pub fn resolve(&self, is_accelerating: bool) -> AnimationId {
        match *self {
            Self::Fixed(id) => id,
            Self::AccelerationBranch {
                accelerating,
                stopping,
            } => {
                if is_accelerating {
                    accelerating
                } else {
                    stopping
                }
            }
        }
    }

    /// Every animation this successor can resolve to
    pub fn targets(&self) -> Vec<AnimationId> {
        match *self {
            Self::Fixed(id) => vec![id],
            Self::AccelerationBranch {
                accelerating,
                stopping,
            } => vec![accelerating, stopping],
        }
    }
}

/// Named event fired when playback reaches a specific frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsTrigger {
    pub frame: u32,
    pub event: &'static str,
}

/// Inclusive, zero-based frame span within the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: u32,
    pub end: u32,
}

impl FrameRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    pub fn contains(&self, frame: u32) -> bool {
        frame >= self.start && frame <= self.end
    }

    pub fn frame_count(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }
}

/// Metadata for one animation
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationEntry {
    pub id: AnimationId,
    pub frames: FrameRange,
    pub frame_rate: f32,
    pub looping: bool,
    pub categories: Vec<AnimationCategory>,
    /// Whether selection may replace this animation before it completes
    pub can_interrupt: bool,
    pub next: Option<NextAnimation>,
    /// Stop animations: minimum released speed that selects this tier
    pub speed_threshold: Option<f32>,
    pub jump_type: Option<JumpType>,
    pub physics_trigger: Option<PhysicsTrigger>,
}

impl AnimationEntry {
    fn new(id: AnimationId, start: u32, end: u32, looping: bool) -> Self {
        Self {
            id,
            frames: FrameRange::new(start, end),
            frame_rate: ANIMATION_FRAME_RATE,
            looping,
            categories: Vec::new(),
            can_interrupt: true,
            next: None,
            speed_threshold: None,
            jump_type: None,
            physics_trigger: None,
        }
    }

    /// Repeats until replaced
    pub fn looping(id: AnimationId, start: u32, end: u32) -> Self {
        Self::new(id, start, end, true)
    }

    /// Plays once and reports completion
    pub fn one_shot(id: AnimationId, start: u32, end: u32) -> Self {
        Self::new(id, start, end, false)
    }

    pub fn with_categories(mut self, categories: &[AnimationCategory]) -> Self {
        self.categories = categories.to_vec();
        self
    }

    pub fn with_next(mut self, next: AnimationId) -> Self {
        self.next = Some(NextAnimation::Fixed(next));
        self
    }

    pub fn with_branch(mut self, accelerating: AnimationId, stopping: AnimationId) -> Self {
        self.next = Some(NextAnimation::AccelerationBranch {
            accelerating,
            stopping,
        });
        self
    }

    pub fn with_frame_rate(mut self, fps: f32) -> Self {
        self.frame_rate = fps;
        self
    }

    pub fn uninterruptible(mut self) -> Self {
        self.can_interrupt = false;
        self
    }

    pub fn with_speed_threshold(mut self, threshold: f32) -> Self {
        self.speed_threshold = Some(threshold);
        self
    }

    pub fn with_jump_type(mut self, jump_type: JumpType) -> Self {
        self.jump_type = Some(jump_type);
        self
    }

    pub fn with_physics_trigger(mut self, frame: u32, event: &'static str) -> Self {
        self.physics_trigger = Some(PhysicsTrigger { frame, event });
        self
    }

    pub fn has_category(&self, category: AnimationCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Length of one pass through the frames, in seconds
    pub fn duration(&self) -> f32 {
        self.frames.frame_count() as f32 / self.frame_rate
    }
}

/// A single configuration problem found while loading the catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogIssue {
    #[error("end frame {end} is before start frame {start}")]
    InvalidFrameRange { start: u32, end: u32 },
    #[error("frame rate {0} is not positive")]
    InvalidFrameRate(f32),
    #[error("physics frame {frame} outside of frame range {start}-{end}")]
    PhysicsFrameOutOfRange { frame: u32, start: u32, end: u32 },
    #[error("next animation `{0}` is not in the catalog")]
    UnknownNextAnimation(AnimationId),
    #[error("declared more than once")]
    DuplicateEntry,
    #[error("no entry declared")]
    MissingEntry,
}

/// All problems found for one animation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("animation `{animation}`: {}", join_issues(.reasons))]
pub struct ValidationError {
    pub animation: AnimationId,
    pub reasons: Vec<CatalogIssue>,
}

fn join_issues(reasons: &[CatalogIssue]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validated animation metadata with precomputed indexes
#[derive(Debug, Clone)]
pub struct AnimationCatalog {
    entries: HashMap<AnimationId, AnimationEntry>,
    by_category: HashMap<AnimationCategory, Vec<AnimationId>>,
    jump_starts: HashMap<JumpType, AnimationId>,
    jump_falls: HashMap<JumpType, AnimationId>,
    /// Stop tiers, highest threshold first
    stopping_tiers: Vec<(f32, AnimationId)>,
    errors: Vec<ValidationError>,
}

impl Default for AnimationCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl AnimationCatalog {
    /// The player's full animation set
    pub fn standard() -> Self {
        Self::new(standard_entries())
    }

    /// Validate, repair and index `entries`
    pub fn new(entries: Vec<AnimationEntry>) -> Self {
        let mut problems: Vec<(AnimationId, CatalogIssue)> = Vec::new();

        let declared: HashSet<AnimationId> = entries.iter().map(|entry| entry.id).collect();
        let mut accepted: HashMap<AnimationId, AnimationEntry> = HashMap::new();
        // Declaration order, so indexes are deterministic
        let mut order: Vec<AnimationId> = Vec::new();

        for mut entry in entries {
            let id = entry.id;
            if accepted.contains_key(&id) {
                problems.push((id, CatalogIssue::DuplicateEntry));
                continue;
            }

            if !entry.frames.is_valid() {
                problems.push((
                    id,
                    CatalogIssue::InvalidFrameRange {
                        start: entry.frames.start,
                        end: entry.frames.end,
                    },
                ));
                entry.frames.end = entry.frames.start;
            }

            if !(entry.frame_rate.is_finite() && entry.frame_rate > 0.0) {
                problems.push((id, CatalogIssue::InvalidFrameRate(entry.frame_rate)));
                entry.frame_rate = ANIMATION_FRAME_RATE;
            }

            if let Some(trigger) = entry.physics_trigger {
                if !entry.frames.contains(trigger.frame) {
                    problems.push((
                        id,
                        CatalogIssue::PhysicsFrameOutOfRange {
                            frame: trigger.frame,
                            start: entry.frames.start,
                            end: entry.frames.end,
                        },
                    ));
                    entry.physics_trigger = None;
                }
            }

            if let Some(next) = entry.next {
                let unknown: Vec<AnimationId> = next
                    .targets()
                    .into_iter()
                    .filter(|target| !declared.contains(target))
                    .collect();
                if !unknown.is_empty() {
                    for target in unknown {
                        problems.push((id, CatalogIssue::UnknownNextAnimation(target)));
                    }
                    entry.next = None;
                }
            }

            order.push(id);
            accepted.insert(id, entry);
        }

        for id in AnimationId::ALL {
            if !accepted.contains_key(&id) {
                problems.push((id, CatalogIssue::MissingEntry));
            }
        }

        let errors = group_problems(problems);
        for error in &errors {
            log::warn!("Animation catalog: {}", error);
        }

        let mut by_category: HashMap<AnimationCategory, Vec<AnimationId>> = HashMap::new();
        let mut jump_starts = HashMap::new();
        let mut jump_falls = HashMap::new();
        let mut stopping_tiers = Vec::new();

        for id in &order {
            let entry = &accepted[id];
            for category in &entry.categories {
                by_category.entry(*category).or_default().push(*id);
            }
            if let Some(jump_type) = entry.jump_type {
                if entry.has_category(AnimationCategory::Jumping) {
                    jump_starts.entry(jump_type).or_insert(*id);
                }
                if entry.has_category(AnimationCategory::Falling) {
                    jump_falls.entry(jump_type).or_insert(*id);
                }
            }
            if let Some(threshold) = entry.speed_threshold {
                if entry.has_category(AnimationCategory::Stopping) {
                    stopping_tiers.push((threshold, *id));
                }
            }
        }
        stopping_tiers.sort_by(|a, b| b.0.total_cmp(&a.0));

        log::debug!(
            "Animation catalog ready: {} animations, {} issues",
            accepted.len(),
            errors.len()
        );

        Self {
            entries: accepted,
            by_category,
            jump_starts,
            jump_falls,
            stopping_tiers,
            errors,
        }
    }

    pub fn get(&self, id: AnimationId) -> Option<&AnimationEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationEntry> {
        self.entries.values()
    }

    pub fn has_category(&self, id: AnimationId, category: AnimationCategory) -> bool {
        self.get(id)
            .map(|entry| entry.has_category(category))
            .unwrap_or(false)
    }

    /// All animations tagged with `category`, in declaration order
    pub fn animations_in(&self, category: AnimationCategory) -> &[AnimationId] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Unknown animations never block selection
    pub fn can_interrupt(&self, id: AnimationId) -> bool {
        self.get(id).map(|entry| entry.can_interrupt).unwrap_or(true)
    }

    /// Successor of `id` for the current acceleration input
    pub fn next_animation(&self, id: AnimationId, is_accelerating: bool) -> Option<AnimationId> {
        self.get(id)?
            .next
            .map(|next| next.resolve(is_accelerating))
    }

    pub fn physics_trigger(&self, id: AnimationId) -> Option<PhysicsTrigger> {
        self.get(id)?.physics_trigger
    }

    /// Start animation for a jump type, falling back to the neutral one
    pub fn jump_start_animation(&self, jump_type: JumpType) -> Option<AnimationId> {
        self.jump_starts
            .get(&jump_type)
            .or_else(|| self.jump_starts.get(&JumpType::Neutral))
            .copied()
    }

    /// Fall loop for a jump type, falling back to the neutral one
    pub fn fall_animation(&self, jump_type: JumpType) -> Option<AnimationId> {
        self.jump_falls
            .get(&jump_type)
            .or_else(|| self.jump_falls.get(&JumpType::Neutral))
            .copied()
    }

    /// Stop animation for a released speed. The highest tier the speed
    /// exceeds wins; speeds below every tier get the lowest one.
    pub fn stopping_animation(&self, speed: f32) -> Option<AnimationId> {
        self.stopping_tiers
            .iter()
            .find(|(threshold, _)| speed > *threshold)
            .or_else(|| self.stopping_tiers.last())
            .map(|(_, id)| *id)
    }

    /// Sprite sheet frame shown `elapsed` seconds into `id`
    pub fn frame_at(&self, id: AnimationId, elapsed: f32) -> u32 {
        let Some(entry) = self.get(id) else {
            return 0;
        };
        let count = entry.frames.frame_count();
        let played = (elapsed.max(0.0) * entry.frame_rate) as u32;
        let offset = if entry.looping {
            played % count
        } else {
            played.min(count - 1)
        };
        entry.frames.start + offset
    }

    /// Problems found at load time, grouped per animation
    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn group_problems(problems: Vec<(AnimationId, CatalogIssue)>) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();
    for (animation, issue) in problems {
        match errors.iter_mut().find(|error| error.animation == animation) {
            Some(error) => error.reasons.push(issue),
            None => errors.push(ValidationError {
                animation,
                reasons: vec![issue],
            }),
        }
    }
    errors
}

/// Frame ranges follow the player sprite sheet
pub fn standard_entries() -> Vec<AnimationEntry> {
    use AnimationCategory::*;
    use AnimationId as A;

    vec![
        AnimationEntry::looping(A::Idle, 0, 58).with_categories(&[Idle]),
        // Running
        AnimationEntry::one_shot(A::RunStart, 0, 28)
            .with_categories(&[Running])
            .with_next(A::RunLoop),
        AnimationEntry::looping(A::RunLoop, 0, 16).with_categories(&[Running]),
        AnimationEntry::one_shot(A::RunStop, 0, 32)
            .with_categories(&[Stopping])
            .with_next(A::Idle)
            .with_speed_threshold(480.0),
        AnimationEntry::one_shot(A::RunStopSlow, 0, 13)
            .with_categories(&[Stopping])
            .with_next(A::Idle)
            .with_speed_threshold(400.0),
        AnimationEntry::one_shot(A::RunSwitch, 0, 19)
            .with_categories(&[Transitioning, Running])
            .with_next(A::RunLoop),
        // Walking
        AnimationEntry::one_shot(A::WalkStart, 0, 11)
            .with_categories(&[Transitioning, Walking])
            .with_next(A::WalkLoop),
        AnimationEntry::looping(A::WalkLoop, 0, 27).with_categories(&[Walking]),
        AnimationEntry::one_shot(A::WalkStop, 0, 12)
            .with_categories(&[Stopping])
            .with_next(A::Idle)
            .with_speed_threshold(150.0),
        // Neutral jump
        AnimationEntry::one_shot(A::JumpNeutralStart, 0, 26)
            .with_categories(&[Jumping])
            .with_next(A::JumpNeutralFall)
            .with_jump_type(JumpType::Neutral)
            .with_physics_trigger(12, JUMP_PHYSICS_EVENT),
        AnimationEntry::looping(A::JumpNeutralFall, 0, 6)
            .with_categories(&[Falling])
            .with_jump_type(JumpType::Neutral),
        AnimationEntry::one_shot(A::JumpNeutralLand, 0, 18)
            .with_categories(&[Landing])
            .with_next(A::Idle),
        // Forward jump
        AnimationEntry::one_shot(A::JumpForwardStart, 0, 22)
            .with_categories(&[Jumping])
            .with_next(A::JumpForwardFall)
            .with_jump_type(JumpType::Forward)
            .with_physics_trigger(12, JUMP_PHYSICS_EVENT),
        AnimationEntry::looping(A::JumpForwardFall, 0, 6)
            .with_categories(&[Falling])
            .with_jump_type(JumpType::Forward),
        AnimationEntry::one_shot(A::JumpForwardLand, 0, 18)
            .with_categories(&[Landing])
            .with_next(A::Idle),
        // Run jump
        AnimationEntry::one_shot(A::RunJumpStart, 0, 23)
            .with_categories(&[Jumping])
            .with_next(A::RunJumpFall)
            .with_jump_type(JumpType::Run)
            .with_physics_trigger(8, JUMP_PHYSICS_EVENT),
        AnimationEntry::looping(A::RunJumpFall, 0, 6)
            .with_categories(&[Falling])
            .with_jump_type(JumpType::Run),
        AnimationEntry::one_shot(A::RunJumpLandLight, 0, 9)
            .with_categories(&[Landing])
            .with_branch(A::RunJumpLandLightContinue, A::RunJumpLandLightStop),
        AnimationEntry::one_shot(A::RunJumpLandHeavy, 0, 18)
            .with_categories(&[Landing])
            .with_branch(A::RunJumpLandHeavyContinue, A::RunJumpLandHeavyStop)
            .uninterruptible(),
        AnimationEntry::one_shot(A::RunJumpLandHeavyBackwards, 0, 18)
            .with_categories(&[Landing])
            .with_branch(A::RunJumpLandHeavyContinue, A::RunJumpLandHeavyStop)
            .uninterruptible(),
        // Landing follow-ups
        AnimationEntry::one_shot(A::RunJumpLandLightContinue, 0, 3)
            .with_categories(&[Landing, Transitioning])
            .with_next(A::RunLoop)
            .uninterruptible(),
        AnimationEntry::one_shot(A::RunJumpLandHeavyContinue, 0, 7)
            .with_categories(&[Landing, Transitioning])
            .with_next(A::RunLoop)
            .uninterruptible(),
        AnimationEntry::one_shot(A::RunJumpLandLightStop, 0, 12)
            .with_categories(&[Stopping, Landing, Transitioning])
            .with_next(A::Idle)
            .uninterruptible(),
        AnimationEntry::one_shot(A::RunJumpLandHeavyStop, 0, 15)
            .with_categories(&[Stopping, Landing, Transitioning])
            .with_next(A::Idle)
            .uninterruptible(),
    ]
}
