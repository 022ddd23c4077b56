//! Query-string construction for resource endpoints.
//!
//! [`UrlBuilder`] appends parameters in call order and decides the separator (`?` or `&`) from
//! whether *any* parameter has already been written, so filters can be combined in either order.
//! [`build_url`] is the one-shot form used by the client facade.

// self
use crate::_prelude::*;

/// Repeatable team filter parameter.
pub const TEAM_IDS_PARAM: &str = "teamIds[]";
/// Single-valued sort parameter.
pub const SORT_PARAM: &str = "sort";

/// Optional filters accepted by list and statistics endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
	/// Team identifiers, kept in the order supplied (duplicates preserved).
	#[serde(default)]
	pub team_ids: Vec<String>,
	/// Sort key understood by the API (e.g. `points`).
	#[serde(default)]
	pub sort: Option<String>,
}
impl Filters {
	/// Creates an empty filter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends one team identifier.
	pub fn team_id(mut self, team_id: impl Display) -> Self {
		self.team_ids.push(team_id.to_string());

		self
	}

	/// Appends several team identifiers, preserving their order.
	pub fn team_ids<I>(mut self, team_ids: I) -> Self
	where
		I: IntoIterator,
		I::Item: Display,
	{
		self.team_ids.extend(team_ids.into_iter().map(|id| id.to_string()));

		self
	}

	/// Sets the sort key.
	pub fn sort(mut self, sort: impl Into<String>) -> Self {
		self.sort = Some(sort.into());

		self
	}

	/// Returns `true` if no parameter would be written.
	pub fn is_empty(&self) -> bool {
		self.team_ids.iter().all(String::is_empty)
			&& self.sort.as_deref().is_none_or(str::is_empty)
	}
}

/// Incremental path-and-query builder.
#[derive(Clone, Debug)]
pub struct UrlBuilder {
	buf: String,
	has_query: bool,
}
impl UrlBuilder {
	/// Starts from an endpoint path; a path that already carries a query keeps it.
	pub fn new(path: impl Into<String>) -> Self {
		let buf = path.into();
		let has_query = buf.contains('?');

		Self { buf, has_query }
	}

	/// Appends `key=value`; empty values are skipped. The value is form-urlencoded, the key is
	/// written verbatim.
	pub fn param(mut self, key: &str, value: &str) -> Self {
		if value.is_empty() {
			return self;
		}

		self.buf.push(if self.has_query { '&' } else { '?' });
		self.buf.push_str(key);
		self.buf.push('=');
		self.buf.extend(url::form_urlencoded::byte_serialize(value.as_bytes()));
		self.has_query = true;

		self
	}

	/// Appends `sort=<value>`.
	pub fn sort(self, sort: &str) -> Self {
		self.param(SORT_PARAM, sort)
	}

	/// Appends one `teamIds[]=<id>` per identifier, in order.
	pub fn team_ids<I>(self, team_ids: I) -> Self
	where
		I: IntoIterator,
		I::Item: Display,
	{
		team_ids.into_iter().fold(self, |builder, id| builder.param(TEAM_IDS_PARAM, &id.to_string()))
	}

	/// Returns the finished path and query.
	pub fn finish(self) -> String {
		self.buf
	}
}

/// Applies `filters` to `path`: the sort key first, then every team identifier.
pub fn build_url(path: &str, filters: &Filters) -> String {
	let mut builder = UrlBuilder::new(path);

	if let Some(sort) = &filters.sort {
		builder = builder.sort(sort);
	}

	builder.team_ids(&filters.team_ids).finish()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn count(haystack: &str, needle: char) -> usize {
		haystack.chars().filter(|c| *c == needle).count()
	}

	#[test]
	fn no_filters_leave_path_unchanged() {
		assert_eq!(build_url("/articles", &Filters::new()), "/articles");
		assert_eq!(build_url("/articles", &Filters::new().sort("").team_id("")), "/articles");
		assert!(Filters::new().sort("").team_id("").is_empty());
	}

	#[test]
	fn team_ids_keep_order_and_duplicates() {
		for ids in [vec!["a"], vec!["a", "b"], vec!["c", "a", "c", "b"]] {
			let url = build_url("/videos", &Filters::new().team_ids(&ids));

			assert_eq!(count(&url, '?'), 1, "{url}");
			assert_eq!(count(&url, '&'), ids.len() - 1, "{url}");

			let expected = ids
				.iter()
				.enumerate()
				.map(|(i, id)| format!("{}teamIds[]={id}", if i == 0 { '?' } else { '&' }))
				.collect::<String>();

			assert_eq!(url, format!("/videos{expected}"));
		}
	}

	#[test]
	fn numeric_team_ids_are_accepted() {
		let url = build_url("/articles", &Filters::new().team_ids([7, 11]));

		assert_eq!(url, "/articles?teamIds[]=7&teamIds[]=11");
	}

	#[test]
	fn sort_and_team_ids_share_one_question_mark() {
		let filters = Filters::new().team_ids(["a", "b"]).sort("name");

		assert_eq!(build_url("/x", &filters), "/x?sort=name&teamIds[]=a&teamIds[]=b");

		let teams_first = UrlBuilder::new("/x").team_ids(["a", "b"]).sort("name").finish();

		assert_eq!(teams_first, "/x?teamIds[]=a&teamIds[]=b&sort=name");
		assert_eq!(build_url("/x", &Filters::new().sort("name")), "/x?sort=name");
	}

	#[test]
	fn empty_team_ids_are_skipped_without_breaking_separators() {
		let url = build_url("/x", &Filters::new().team_ids(["", "a", "", "b"]));

		assert_eq!(url, "/x?teamIds[]=a&teamIds[]=b");
	}

	#[test]
	fn values_are_encoded() {
		let url = build_url("/x", &Filters::new().sort("a b&c").team_id("x=y"));

		assert_eq!(url, "/x?sort=a+b%26c&teamIds[]=x%3Dy");
	}

	#[test]
	fn existing_query_switches_to_ampersand() {
		assert_eq!(UrlBuilder::new("/x?page=2").sort("name").finish(), "/x?page=2&sort=name");
	}

	#[test]
	fn filters_deserialize_from_camel_case() {
		let filters: Filters = serde_json::from_str(r#"{"teamIds":["a"],"sort":"goals"}"#)
			.expect("Filters payload should deserialize.");

		assert_eq!(filters, Filters::new().team_id("a").sort("goals"));
	}
}
