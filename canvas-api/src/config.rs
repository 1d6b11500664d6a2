use std::env;
use std::fmt;

use anyhow::{Context, Result};

use crate::course::CourseId;

pub const DOMAIN_VAR: &str = "CANVAS_DOMAIN";
pub const COURSE_ID_VAR: &str = "CANVAS_COURSE_ID";
pub const API_TOKEN_VAR: &str = "CANVAS_API_TOKEN";

/// Connection parameters for a single Canvas course. Any of them may be absent; that is only an
/// error once a request actually needs the missing value.
#[derive(Clone)]
pub struct CanvasConfig {
    domain: Option<String>,
    course_id: Option<CourseId>,
    api_token: Option<String>,
}

impl CanvasConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            domain: var(DOMAIN_VAR),
            course_id: var(COURSE_ID_VAR).map(CourseId::new),
            api_token: var(API_TOKEN_VAR),
        }
    }

    pub fn new(domain: String, course_id: CourseId, api_token: String) -> Self {
        Self {
            domain: Some(domain),
            course_id: Some(course_id),
            api_token: Some(api_token),
        }
    }

    pub fn domain(&self) -> Result<&str> {
        self.domain
            .as_deref()
            .with_context(|| format!("`{DOMAIN_VAR}` is not set"))
    }

    pub fn course_id(&self) -> Result<&CourseId> {
        self.course_id
            .as_ref()
            .with_context(|| format!("`{COURSE_ID_VAR}` is not set"))
    }

    pub fn api_token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .with_context(|| format!("`{API_TOKEN_VAR}` is not set"))
    }

    pub fn check(&self) -> ConfigCheck {
        let shown = |value: Option<&str>| match value {
            Some(value) => VarState::Present(value.to_owned()),
            None => VarState::Missing,
        };

        ConfigCheck {
            vars: [
                VarStatus {
                    name: DOMAIN_VAR,
                    state: shown(self.domain.as_deref()),
                },
                VarStatus {
                    name: COURSE_ID_VAR,
                    state: shown(self.course_id.as_ref().map(CourseId::as_str)),
                },
                VarStatus {
                    name: API_TOKEN_VAR,
                    state: match self.api_token {
                        Some(_) => VarState::Hidden,
                        None => VarState::Missing,
                    },
                },
            ],
        }
    }
}

impl fmt::Debug for CanvasConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasConfig")
            .field("domain", &self.domain)
            .field("course_id", &self.course_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<hidden>"))
            .finish()
    }
}

/// Presence of each connection variable, in load order.
#[derive(Debug, Clone)]
pub struct ConfigCheck {
    vars: [VarStatus; 3],
}

impl ConfigCheck {
    pub fn vars(&self) -> &[VarStatus] {
        &self.vars
    }

    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.vars
            .iter()
            .filter(|var| !var.is_present())
            .map(|var| var.name)
    }

    pub fn is_complete(&self) -> bool {
        self.missing().next().is_none()
    }
}

#[derive(Debug, Clone)]
pub struct VarStatus {
    name: &'static str,
    state: VarState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum VarState {
    Present(String),
    Hidden,
    Missing,
}

impl VarStatus {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_present(&self) -> bool {
        self.state != VarState::Missing
    }
}

impl fmt::Display for VarStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.state {
            VarState::Present(value) => write!(f, "{}: {value}", self.name),
            VarState::Hidden => write!(f, "{}: loaded", self.name),
            VarState::Missing => write!(f, "{}: missing", self.name),
        }
    }
}
