//! Validated path parameters.
//!
//! Every typed operation converts its arguments through [`IntoParam`] before touching the cache or
//! the network, so a malformed season or team identifier fails fast with a
//! [`ValidationError`] that names the offending parameter.

// std
use std::{borrow::Borrow, ops::Deref, str::FromStr};
// self
use crate::{_prelude::*, error::ValidationError};

/// Maximum character count accepted for a team identifier.
pub const TEAM_ID_MAX_LEN: usize = 128;

const TEAM_ID_FORBIDDEN: [char; 4] = ['/', '?', '#', '&'];

/// Conversion of caller input into a validated path parameter.
pub trait IntoParam<P> {
	/// Validates `self` and produces the parameter.
	fn into_param(self) -> Result<P, ValidationError>;
}

macro_rules! def_number_param {
	($name:ident, $doc:literal, $parameter:literal) => {
		#[doc = $doc]
		#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(u64);
		impl $name {
			/// Parameter name reported by validation errors.
			pub const PARAMETER: &'static str = $parameter;

			/// Wraps an already non-negative integer.
			pub const fn new(value: u64) -> Self {
				Self(value)
			}

			/// Returns the raw integer.
			pub const fn get(self) -> u64 {
				self.0
			}
		}
		impl From<$name> for u64 {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!(stringify!($name), "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				Display::fmt(&self.0, f)
			}
		}
		impl IntoParam<$name> for $name {
			fn into_param(self) -> Result<$name, ValidationError> {
				Ok(self)
			}
		}
		impl IntoParam<$name> for u16 {
			fn into_param(self) -> Result<$name, ValidationError> {
				Ok($name(u64::from(self)))
			}
		}
		impl IntoParam<$name> for u32 {
			fn into_param(self) -> Result<$name, ValidationError> {
				Ok($name(u64::from(self)))
			}
		}
		impl IntoParam<$name> for u64 {
			fn into_param(self) -> Result<$name, ValidationError> {
				Ok($name(self))
			}
		}
		impl IntoParam<$name> for i32 {
			fn into_param(self) -> Result<$name, ValidationError> {
				from_i64($parameter, i64::from(self)).map($name)
			}
		}
		impl IntoParam<$name> for i64 {
			fn into_param(self) -> Result<$name, ValidationError> {
				from_i64($parameter, self).map($name)
			}
		}
		impl IntoParam<$name> for f64 {
			fn into_param(self) -> Result<$name, ValidationError> {
				from_f64($parameter, self).map($name)
			}
		}
		impl IntoParam<$name> for &Value {
			fn into_param(self) -> Result<$name, ValidationError> {
				from_json($parameter, self).map($name)
			}
		}
		impl IntoParam<$name> for Value {
			fn into_param(self) -> Result<$name, ValidationError> {
				from_json($parameter, &self).map($name)
			}
		}
	};
}

def_number_param! { Season, "Season year used in season-scoped paths.", "season" }
def_number_param! { GameId, "Numeric game identifier within a season.", "gameId" }

/// Team identifier as issued by the API (e.g. `2459-2459`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);
impl TeamId {
	/// Parameter name reported by validation errors.
	pub const PARAMETER: &'static str = "teamId";

	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
		let view = value.as_ref();

		validate_team_id(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for TeamId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for TeamId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for TeamId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<TeamId> for String {
	fn from(value: TeamId) -> Self {
		value.0
	}
}
impl TryFrom<String> for TeamId {
	type Error = ValidationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_team_id(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for TeamId {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for TeamId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TeamId({})", self.0)
	}
}
impl Display for TeamId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl IntoParam<TeamId> for TeamId {
	fn into_param(self) -> Result<TeamId, ValidationError> {
		Ok(self)
	}
}
impl IntoParam<TeamId> for &TeamId {
	fn into_param(self) -> Result<TeamId, ValidationError> {
		Ok(self.clone())
	}
}
impl IntoParam<TeamId> for &str {
	fn into_param(self) -> Result<TeamId, ValidationError> {
		TeamId::new(self)
	}
}
impl IntoParam<TeamId> for String {
	fn into_param(self) -> Result<TeamId, ValidationError> {
		TeamId::try_from(self)
	}
}
impl IntoParam<TeamId> for &String {
	fn into_param(self) -> Result<TeamId, ValidationError> {
		TeamId::new(self)
	}
}

fn validate_team_id(view: &str) -> Result<(), ValidationError> {
	const PARAMETER: &str = TeamId::PARAMETER;

	if view.is_empty() {
		return Err(ValidationError::Empty { parameter: PARAMETER });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(ValidationError::ContainsWhitespace { parameter: PARAMETER });
	}
	if let Some(character) = view.chars().find(|c| TEAM_ID_FORBIDDEN.contains(c)) {
		return Err(ValidationError::ForbiddenCharacter { parameter: PARAMETER, character });
	}
	if view.chars().count() > TEAM_ID_MAX_LEN {
		return Err(ValidationError::TooLong { parameter: PARAMETER, max: TEAM_ID_MAX_LEN });
	}

	Ok(())
}

fn from_i64(parameter: &'static str, value: i64) -> Result<u64, ValidationError> {
	u64::try_from(value).map_err(|_| ValidationError::Negative { parameter })
}

fn from_f64(parameter: &'static str, value: f64) -> Result<u64, ValidationError> {
	// 2^64, the first float past `u64::MAX`.
	const UPPER: f64 = 18_446_744_073_709_551_616.0;

	if !value.is_finite() || value.fract() != 0.0 {
		return Err(ValidationError::NotAnInteger { parameter });
	}
	if value < 0.0 {
		return Err(ValidationError::Negative { parameter });
	}
	if value >= UPPER {
		return Err(ValidationError::OutOfRange { parameter });
	}

	Ok(value as u64)
}

fn from_json(parameter: &'static str, value: &Value) -> Result<u64, ValidationError> {
	let Value::Number(number) = value else {
		return Err(ValidationError::NotAnInteger { parameter });
	};

	if let Some(value) = number.as_u64() {
		return Ok(value);
	}
	if let Some(value) = number.as_i64() {
		return from_i64(parameter, value);
	}

	match number.as_f64() {
		Some(value) => from_f64(parameter, value),
		None => Err(ValidationError::NotAnInteger { parameter }),
	}
}
