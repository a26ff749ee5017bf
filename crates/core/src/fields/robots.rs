//! Robots directives: options, results and override hygiene.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use log::warn;
use metafield_resolution::{Candidate, FilterContext, ResolutionFilter};
use serde::Serialize;

use crate::constants::{
    PROFILE_ROBOTS_NOARCHIVE, PROFILE_ROBOTS_NOFOLLOW, PROFILE_ROBOTS_NOINDEX, ROBOTS_OFF,
    ROBOTS_ON,
};

/// Prefix shared by every robots profile.
const ROBOTS_PROFILE_PREFIX: &str = "robots:";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotsDirective {
    NoIndex,
    NoFollow,
    NoArchive,
}

impl RobotsDirective {
    pub const ALL: [RobotsDirective; 3] = [Self::NoIndex, Self::NoFollow, Self::NoArchive];

    pub fn profile(&self) -> &'static str {
        match self {
            Self::NoIndex => PROFILE_ROBOTS_NOINDEX,
            Self::NoFollow => PROFILE_ROBOTS_NOFOLLOW,
            Self::NoArchive => PROFILE_ROBOTS_NOARCHIVE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoIndex => "noindex",
            Self::NoFollow => "nofollow",
            Self::NoArchive => "noarchive",
        }
    }
}

impl fmt::Display for RobotsDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bit flags adjusting a robots resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RobotsOptions(u8);

impl RobotsOptions {
    pub const NONE: Self = Self(0);
    /// Skip the settings-based sources, including the site-wide default.
    pub const IGNORE_SETTINGS: Self = Self(1);
    /// Skip the protected-content source.
    pub const IGNORE_PROTECTION: Self = Self(1 << 1);
    /// Report which source asserted each enabled directive.
    pub const ASSERT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for RobotsOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RobotsOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Resolved state of one directive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveState {
    pub directive: RobotsDirective,
    pub enabled: bool,
    /// Source that asserted the directive; only filled with
    /// [`RobotsOptions::ASSERT`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asserted_by: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RobotsMeta {
    pub directives: Vec<DirectiveState>,
}

impl RobotsMeta {
    pub fn get(&self, directive: RobotsDirective) -> Option<&DirectiveState> {
        self.directives.iter().find(|d| d.directive == directive)
    }

    pub fn is_enabled(&self, directive: RobotsDirective) -> bool {
        self.get(directive).is_some_and(|d| d.enabled)
    }

    pub fn asserted_by(&self, directive: RobotsDirective) -> Option<&str> {
        self.get(directive).and_then(|d| d.asserted_by.as_deref())
    }

    /// Enabled directives as a robots meta tag value, e.g. `noindex,nofollow`.
    pub fn content(&self) -> String {
        self.directives
            .iter()
            .filter(|d| d.enabled)
            .map(|d| d.directive.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Drops robots overrides that are neither `"1"` nor `"0"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RobotsOverrideFilter;

impl ResolutionFilter for RobotsOverrideFilter {
    fn filter_override(&self, value: Option<Candidate>, ctx: &FilterContext<'_>) -> Option<Candidate> {
        if !ctx.target.profile.starts_with(ROBOTS_PROFILE_PREFIX) {
            return value;
        }
        value.filter(|candidate| {
            let valid = candidate.value == ROBOTS_ON || candidate.value == ROBOTS_OFF;
            if !valid {
                warn!(
                    "Ignoring robots override '{}' for {} '{}'",
                    candidate.value, ctx.concrete, ctx.target.profile
                );
            }
            valid
        })
    }
}
