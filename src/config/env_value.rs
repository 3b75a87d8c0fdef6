// ABOUTME: Secret values given literally or by reference to an environment variable.
// ABOUTME: Used for root password hashes so they need not live in the manifest.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required environment variable: {0}")]
pub struct MissingEnvVar(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn resolve(&self) -> Result<String, MissingEnvVar> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(val),
                Err(_) => default.clone().ok_or_else(|| MissingEnvVar(var.clone())),
            },
        }
    }
}
