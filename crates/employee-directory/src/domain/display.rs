//! Deterministic avatar colours and initials for people without a photo.
//!
//! These helpers are pure functions of their input so the same name renders
//! the same badge in every process.

use super::employee::EmployeeStatus;

/// Colour used when there is no name to derive one from.
pub const FALLBACK_AVATAR_COLOR: &str = "#6b7280";

/// Hash `name` into an HSL colour string.
///
/// The hash folds UTF-16 code units as `hash * 31 + unit` with 32-bit signed
/// wraparound, so results match across platforms. Callers with an empty name
/// should use [`avatar_color`] instead.
///
/// ```
/// use employee_directory::domain::color_from_string;
///
/// assert_eq!(color_from_string("Alice"), color_from_string("Alice"));
/// assert!(color_from_string("Alice").starts_with("hsl("));
/// ```
#[must_use]
pub fn color_from_string(name: &str) -> String {
    let hash = name
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    let hue = hash.unsigned_abs().rem_euclid(360);
    format!("hsl({hue}, 70%, 45%)")
}

/// Avatar colour for `name`, using [`FALLBACK_AVATAR_COLOR`] for blank names.
#[must_use]
pub fn avatar_color(name: &str) -> String {
    if name.trim().is_empty() {
        FALLBACK_AVATAR_COLOR.to_owned()
    } else {
        color_from_string(name)
    }
}

/// Two-letter badge text for `name`.
///
/// A single word contributes its first two characters; otherwise the first
/// and last words contribute one character each.
///
/// ```
/// use employee_directory::domain::initials_from_name;
///
/// assert_eq!(initials_from_name("John Doe"), "JD");
/// assert_eq!(initials_from_name("Madonna"), "MA");
/// assert_eq!(initials_from_name("  "), "");
/// ```
#[must_use]
pub fn initials_from_name(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };
    let letters: Vec<char> = words.last().map_or_else(
        || first.chars().take(2).collect(),
        |last| first.chars().take(1).chain(last.chars().take(1)).collect(),
    );
    letters.into_iter().flat_map(char::to_uppercase).collect()
}

/// CSS colour name used to render a status label.
#[must_use]
pub const fn status_color(status: Option<&EmployeeStatus>) -> &'static str {
    match status {
        Some(EmployeeStatus::Active) => "green",
        Some(EmployeeStatus::Remote) => "teal",
        Some(EmployeeStatus::OnLeave) => "orange",
        Some(EmployeeStatus::Resigned) => "red",
        Some(EmployeeStatus::Other(_)) | None => "gray",
    }
}

#[cfg(test)]
mod tests {
    //! Covers hashing stability and initials rules.

    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[test]
    fn colour_is_a_pure_function_of_the_name() {
        for name in ["Alice", "Bob", "Zoë Saldaña", "李小龙"] {
            assert_eq!(color_from_string(name), color_from_string(name));
        }
    }

    #[rstest]
    #[case("", "hsl(0, 70%, 45%)")]
    #[case("A", "hsl(65, 70%, 45%)")]
    #[case("Ab", "hsl(313, 70%, 45%)")]
    fn colour_matches_known_hashes(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(color_from_string(name), expected);
    }

    #[test]
    fn distinct_names_rarely_collide() {
        let names = ["Alice", "Bob", "Carol", "Dave", "Eve", "Mallory"];
        let colours: HashSet<String> = names.iter().map(|name| color_from_string(name)).collect();
        assert_eq!(colours.len(), names.len());
    }

    #[test]
    fn long_names_wrap_without_overflow() {
        let name = "Wolfeschlegelsteinhausenbergerdorff ".repeat(40);
        let colour = color_from_string(&name);
        let hue: u32 = colour
            .trim_start_matches("hsl(")
            .split(',')
            .next()
            .and_then(|hue| hue.parse().ok())
            .expect("hue should parse");
        assert!(hue < 360);
    }

    #[test]
    fn blank_names_use_the_fallback_colour() {
        assert_eq!(avatar_color(""), FALLBACK_AVATAR_COLOR);
        assert_eq!(avatar_color("   "), FALLBACK_AVATAR_COLOR);
        assert_eq!(avatar_color("Alice"), color_from_string("Alice"));
    }

    #[rstest]
    #[case("John Doe", "JD")]
    #[case("  john   ronald reuel tolkien ", "JT")]
    #[case("Madonna", "MA")]
    #[case("x", "X")]
    #[case("", "")]
    #[case("élodie durand", "ÉD")]
    fn derives_initials(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(initials_from_name(name), expected);
    }

    #[rstest]
    #[case(Some(EmployeeStatus::Active), "green")]
    #[case(Some(EmployeeStatus::Remote), "teal")]
    #[case(Some(EmployeeStatus::OnLeave), "orange")]
    #[case(Some(EmployeeStatus::Resigned), "red")]
    #[case(Some(EmployeeStatus::Other("Contractor".to_owned())), "gray")]
    #[case(None, "gray")]
    fn maps_status_to_colour(#[case] status: Option<EmployeeStatus>, #[case] expected: &str) {
        assert_eq!(status_color(status.as_ref()), expected);
    }
}
