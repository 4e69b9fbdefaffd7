//! Granting and updating member roles

use super::GitLabApi;
use super::result::OperationResult;
use super::role::role_to_access_level;
use crate::error::OperationError;
use crate::gitlab::{ApiMessage, MemberPayload, MemberTarget};
use reqwest::StatusCode;
use tracing::{info, instrument};

impl GitLabApi {
    /// Grant `role` to `username` on a project or, failing that, a group.
    ///
    /// `target` is first tried as a project path; only if no such project
    /// exists is it tried as a group path.
    #[instrument(skip(self))]
    pub async fn grant_role_permissions(
        &self,
        username: &str,
        target: &str,
        role: &str,
    ) -> OperationResult {
        let Some(user_id) = self.resolve_user_id(username).await else {
            return OperationResult::failure(format!("User \"{username}\" not found"));
        };

        if let Some(project_id) = self.resolve_project_id(target).await {
            return self
                .upsert_member(MemberTarget::Project, project_id, user_id, role)
                .await;
        }

        if let Some(group_id) = self.resolve_group_id(target).await {
            return self
                .upsert_member(MemberTarget::Group, group_id, user_id, role)
                .await;
        }

        OperationResult::failure(format!("Repository or group \"{target}\" not found"))
    }

    /// Update the membership if it exists, create it otherwise
    async fn upsert_member(
        &self,
        target: MemberTarget,
        target_id: u64,
        user_id: u64,
        role: &str,
    ) -> OperationResult {
        match self.try_upsert_member(target, target_id, user_id, role).await {
            Ok(result) => result,
            Err(e) => OperationResult::failure(format!(
                "Error managing {} member: {e}",
                target.noun()
            )),
        }
    }

    async fn try_upsert_member(
        &self,
        target: MemberTarget,
        target_id: u64,
        user_id: u64,
        role: &str,
    ) -> Result<OperationResult, OperationError> {
        let payload = MemberPayload {
            user_id,
            access_level: role_to_access_level(role)?,
        };

        let collection = format!("/{}/{}/members", target.collection(), target_id);
        let member = format!("{collection}/{user_id}");

        let existing = self.client.get(&member).await?;
        let (action, response) = if existing.status() == StatusCode::OK {
            ("updated", self.client.put(&member, &payload).await?)
        } else {
            ("granted", self.client.post(&collection, &payload).await?)
        };

        if matches!(response.status(), StatusCode::OK | StatusCode::CREATED) {
            info!(kind = target.noun(), target_id, user_id, action, "Member role changed");
            return Ok(OperationResult::success(format!(
                "Role {action} successfully. User \"{user_id}\" now has \"{role}\" role on {} \"{target_id}\"",
                target.noun()
            )));
        }

        let detail = response
            .json::<ApiMessage>()
            .ok()
            .and_then(|body| body.text())
            .unwrap_or_else(|| "Unknown error".to_string());

        Ok(OperationResult::failure(format!(
            "Failed to {action} role: {detail}"
        )))
    }
}
