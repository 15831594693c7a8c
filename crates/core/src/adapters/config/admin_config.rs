use super::secret::Secret;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AdminConfig {
    pub password: Secret,
}
