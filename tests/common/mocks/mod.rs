//! Mock implementations for external dependencies
//! This module contains mock objects used for testing

use async_trait::async_trait;
use haruhichan::utils::roles::{ResolvedRole, RoleError, RoleGateway};
use mockall::mock;
use serenity::all::{GuildId, RoleId, UserId};

mock! {
    pub Roles {}

    #[async_trait]
    impl RoleGateway for Roles {
        async fn find_role(
            &self,
            guild_id: GuildId,
            role_id: RoleId,
        ) -> Result<Option<ResolvedRole>, RoleError>;

        async fn add_member_role(
            &self,
            guild_id: GuildId,
            user_id: UserId,
            role_id: RoleId,
        ) -> Result<(), RoleError>;

        async fn remove_member_role(
            &self,
            guild_id: GuildId,
            user_id: UserId,
            role_id: RoleId,
        ) -> Result<(), RoleError>;
    }
}
