//! Player actions available during a trial turn.
//!
//! Each turn the player answers the telegraphed intent with one
//! [`TrialAction`]. The variants carry everything the resolver needs, so an
//! action is either fully specified or rejected before any draw is made.

mod error;
mod resolve;

pub use error::{ActionError, ActionParseError};
pub use resolve::{PillUse, TurnReport};

pub(crate) use resolve::{Verdict, resolve_action, surge_chance};

use core::str::FromStr;

use crate::env::PillQuality;
use crate::state::PillRef;

/// The four responses to an incoming intent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrialAction {
    /// Brace: takes 75% damage and clears one mind chaos or burn stack.
    Steady,
    /// Take a pill from the inventory instead of mitigating.
    Pill(PillRef),
    /// Block: takes 50% damage but leaves the player weak next turn.
    Guard,
    /// Gamble: success vents wrath, failure takes 140% damage and mind chaos.
    Surge,
}

impl TrialAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Steady => ActionKind::Steady,
            Self::Pill(_) => ActionKind::Pill,
            Self::Guard => ActionKind::Guard,
            Self::Surge => ActionKind::Surge,
        }
    }
}

/// Payload-free discriminant of [`TrialAction`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Steady,
    Pill,
    Guard,
    Surge,
}

impl FromStr for TrialAction {
    type Err = ActionParseError;

    /// Parses `steady`, `guard`, `surge` or `pill:<id>[:<quality>]`.
    ///
    /// Quality defaults to `common` when omitted.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let mut parts = input.split(':');
        let head = parts.next().unwrap_or_default().to_ascii_lowercase();

        match head.as_str() {
            "steady" => Ok(Self::Steady),
            "guard" => Ok(Self::Guard),
            "surge" => Ok(Self::Surge),
            "pill" => {
                let id = parts
                    .next()
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| ActionParseError::MissingPillId(input.to_string()))?;
                let quality = match parts.next() {
                    Some(raw) => raw
                        .parse::<PillQuality>()
                        .map_err(|_| ActionParseError::UnknownQuality(raw.to_string()))?,
                    None => PillQuality::Common,
                };
                Ok(Self::Pill(PillRef::new(id, quality)))
            }
            _ => Err(ActionParseError::UnknownAction(input.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_actions() {
        assert_eq!("steady".parse::<TrialAction>(), Ok(TrialAction::Steady));
        assert_eq!(" Guard ".parse::<TrialAction>(), Ok(TrialAction::Guard));
        assert_eq!("SURGE".parse::<TrialAction>(), Ok(TrialAction::Surge));
    }

    #[test]
    fn parses_pill_with_optional_quality() {
        assert_eq!(
            "pill:qi_pill:perfect".parse::<TrialAction>(),
            Ok(TrialAction::Pill(PillRef::new("qi_pill", PillQuality::Perfect)))
        );
        assert_eq!(
            "pill:qi_pill".parse::<TrialAction>(),
            Ok(TrialAction::Pill(PillRef::new("qi_pill", PillQuality::Common)))
        );
    }

    #[test]
    fn rejects_malformed_actions() {
        assert!(matches!(
            "pill".parse::<TrialAction>(),
            Err(ActionParseError::MissingPillId(_))
        ));
        assert!(matches!(
            "pill:qi_pill:legendary".parse::<TrialAction>(),
            Err(ActionParseError::UnknownQuality(_))
        ));
        assert!(matches!(
            "flee".parse::<TrialAction>(),
            Err(ActionParseError::UnknownAction(_))
        ));
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(TrialAction::Surge.kind().to_string(), "surge");
        assert_eq!(ActionKind::Pill.as_ref(), "pill");
    }
}
