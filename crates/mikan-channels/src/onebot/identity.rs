use async_trait::async_trait;
use mikan_common::{Error, Result};
use mikan_config::AppConfig;
use serde::Deserialize;
use tracing::debug;

use crate::traits::IdentityResolver;

/// Identity resolution backed by the OneBot HTTP API.
///
/// Knows the agent's own id and persona from config; group member names go
/// through `get_group_member_info`, preferring the group card over the
/// profile nickname.
pub struct OneBotIdentity {
    self_id: String,
    persona_name: String,
    api_base: String,
    access_token: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    retcode: i64,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct GroupMember {
    #[serde(default)]
    card: String,
    #[serde(default)]
    nickname: String,
}

impl OneBotIdentity {
    pub fn new(
        self_id: impl Into<String>,
        persona_name: impl Into<String>,
        api_base: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            self_id: self_id.into(),
            persona_name: persona_name.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            cfg.bot.self_id.clone(),
            cfg.bot.persona_name.clone(),
            cfg.onebot.api_base.clone(),
            cfg.onebot.access_token.clone(),
        )
    }
}

#[async_trait]
impl IdentityResolver for OneBotIdentity {
    fn self_id(&self) -> &str {
        &self.self_id
    }

    fn persona_name(&self) -> &str {
        &self.persona_name
    }

    async fn group_display_name(&self, group_id: i64, user_id: &str) -> Result<String> {
        let user_id: i64 = user_id
            .parse()
            .map_err(|_| Error::Identity(format!("invalid user id: {user_id}")))?;

        let mut request = self
            .http
            .post(format!("{}/get_group_member_info", self.api_base))
            .json(&serde_json::json!({
                "group_id": group_id,
                "user_id": user_id,
                "no_cache": false,
            }));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response: ApiResponse<GroupMember> = request
            .send()
            .await
            .map_err(|e| Error::Identity(format!("get_group_member_info failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Identity(format!("get_group_member_info failed: {e}")))?
            .json()
            .await
            .map_err(|e| Error::Identity(format!("bad get_group_member_info reply: {e}")))?;

        if response.retcode != 0 {
            return Err(Error::Identity(format!(
                "get_group_member_info retcode {} for {user_id} in {group_id}",
                response.retcode
            )));
        }
        let member = response.data.ok_or_else(|| {
            Error::Identity(format!("no member data for {user_id} in {group_id}"))
        })?;

        let name = if member.card.is_empty() {
            member.nickname
        } else {
            member.card
        };
        if name.is_empty() {
            return Err(Error::Identity(format!(
                "member {user_id} in {group_id} has no resolvable name"
            )));
        }
        debug!(group_id, user_id, name, "resolved group member");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_identity_comes_from_config() {
        let mut cfg = AppConfig::default();
        cfg.bot.self_id = "10001".into();
        cfg.bot.persona_name = "Mikan".into();
        let identity = OneBotIdentity::from_config(&cfg);
        assert_eq!(identity.self_id(), "10001");
        assert_eq!(identity.persona_name(), "Mikan");
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let identity = OneBotIdentity::new("1", "M", "http://127.0.0.1:5700/", None);
        assert_eq!(identity.api_base, "http://127.0.0.1:5700");
    }
}
