use crate::resolve::EffectiveStyle;

/// Compute the header guard of `path` for the given style.
///
/// All rename rules are applied first, then all base directory rules. Each
/// rule only looks at the rightmost occurrence of its marker, which is the
/// one closest to the file name.
///
/// ```
/// use hguard_core::guard::compute;
/// use hguard_core::resolve::EffectiveStyle;
///
/// let guard = compute("/proj/src/foo/bar.h", &EffectiveStyle::default());
/// assert_eq!(guard, "_SRC_FOO_BAR_H");
/// ```
pub fn compute(path: &str, style: &EffectiveStyle) -> String {
    let mut guard = path.replace('\\', "/");

    for rule in &style.rename_dirs {
        if let Some(pos) = guard.rfind(&rule.marker) {
            guard.replace_range(pos..pos + rule.marker.len(), &rule.replacement);
        }
    }

    for rule in &style.base_dirs {
        if let Some(pos) = guard.rfind(&rule.marker) {
            guard = format!("{}{}", rule.replacement, &guard[pos + rule.marker.len()..]);
        }
    }

    guard
        .chars()
        .map(|c| match c {
            '/' | '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
