//! Preference keys read and written by the controller.
//!
//! Values are strings. Boolean preferences hold the literals `"true"` and
//! `"false"` and are compared case-insensitively.

pub const OPEN_URI_SHOW_DIALOG: &str = "openUriShowDialog";
pub const OPEN_URI_USE_URI: &str = "openUriUseUri";
pub const OPEN_URI_ADDRESS: &str = "openUriAddress";
pub const OPEN_URI_LABEL: &str = "openUriLabel";
pub const OPEN_URI_AMOUNT: &str = "openUriAmount";

pub const SEND_ADDRESS: &str = "sendAddress";
pub const SEND_LABEL: &str = "sendLabel";
pub const SEND_AMOUNT: &str = "sendAmount";
pub const SEND_PERFORM_PASTE_NOW: &str = "sendPerformPasteNow";

pub const BRING_TO_FRONT: &str = "bringToFront";

pub const TRUE: &str = "true";
pub const FALSE: &str = "false";

/// True only for an explicit `"false"`. An absent value is not false.
pub fn is_explicitly_false(value: Option<&str>) -> bool {
	value.is_some_and(|v| v.eq_ignore_ascii_case(FALSE))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_explicit_false() {
		assert!(is_explicitly_false(Some("false")));
		assert!(is_explicitly_false(Some("FALSE")));
		assert!(is_explicitly_false(Some("False")));
		assert!(!is_explicitly_false(Some("true")));
		assert!(!is_explicitly_false(Some("")));
		assert!(!is_explicitly_false(None));
	}
}
