use rapier2d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player characters
    Player = 0b0000_0010,

    /// Static platforms, floors and walls
    Platform = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Players stand on platforms but pass through each other
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Platform as u32 | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Platform => Group::from_bits_truncate(
                CollisionGroups::Player as u32 | CollisionGroups::Default as u32,
            ),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }

    /// Query filter that only sees colliders this group collides with
    pub fn query_groups(self) -> InteractionGroups {
        let groups = self.to_interaction_groups();
        InteractionGroups::new(Group::ALL, groups.filter)
    }
}
