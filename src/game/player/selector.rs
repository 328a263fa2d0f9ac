// Animation selection - derives the animation for the current player state
//
// Selection only reads state. Lifecycle side effects (stage resets, memo
// clearing, committing a turn) live in the controller's completion handler.

use super::catalog::{AnimationCatalog, AnimationCategory, AnimationId};
use super::state::{Direction, JumpStage, JumpType, LandingType, PlayerState};

/// Pick the animation for `state`, or `None` to keep the current one.
///
/// `stage_changed` is set when the jump sub-machine fired a transition this
/// tick, which is the only thing allowed to cut a non-interruptible animation.
pub fn select(
    state: &PlayerState,
    catalog: &AnimationCatalog,
    stage_changed: bool,
) -> Option<AnimationId> {
    let current = state.animation;
    if !stage_changed && !catalog.can_interrupt(current) {
        return None;
    }

    let jump_type = state.jump.jump_type.unwrap_or_default();
    let choice = match state.jump.stage {
        JumpStage::Jumping => catalog.jump_start_animation(jump_type),
        JumpStage::Falling => catalog.fall_animation(jump_type),
        JumpStage::Landing => landing_animation(state, catalog),
        JumpStage::Grounded => grounded_animation(state, catalog),
    };

    choice.filter(|id| *id != current && catalog.contains(*id))
}

fn landing_animation(state: &PlayerState, catalog: &AnimationCatalog) -> Option<AnimationId> {
    // Already in the landing chain; completion drives it from here
    if catalog.has_category(state.animation, AnimationCategory::Landing) {
        return None;
    }

    let animation = match state.jump.landing_type {
        Some(LandingType::Heavy) => {
            let travel = Direction::from_velocity(state.velocity.x).unwrap_or(state.facing);
            if travel != state.facing && catalog.contains(AnimationId::RunJumpLandHeavyBackwards) {
                AnimationId::RunJumpLandHeavyBackwards
            } else {
                AnimationId::RunJumpLandHeavy
            }
        }
        Some(LandingType::Light) => AnimationId::RunJumpLandLight,
        Some(LandingType::Stationary) | None => {
            if state.jump.jump_type == Some(JumpType::Forward) {
                AnimationId::JumpForwardLand
            } else {
                AnimationId::JumpNeutralLand
            }
        }
    };
    Some(animation)
}

fn grounded_animation(state: &PlayerState, catalog: &AnimationCatalog) -> Option<AnimationId> {
    let movement = &state.movement;

    if !movement.is_accelerating {
        return match movement.stopping_initial_speed {
            Some(speed) => catalog
                .stopping_animation(speed)
                .or(Some(AnimationId::Idle)),
            None => Some(AnimationId::Idle),
        };
    }

    if movement.switch_target_direction.is_some() {
        return Some(AnimationId::RunSwitch);
    }

    let (family, start) = if movement.is_walking {
        (AnimationCategory::Walking, AnimationId::WalkStart)
    } else {
        (AnimationCategory::Running, AnimationId::RunStart)
    };
    if catalog.has_category(state.animation, family) {
        None
    } else {
        Some(start)
    }
}
