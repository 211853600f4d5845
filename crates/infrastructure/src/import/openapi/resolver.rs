//! Local `$ref` resolution.
//!
//! Only pointers of the form `#/components/<section>/<name>` resolve. External
//! files, nested pointers and unknown names resolve to `None`; callers then
//! keep the unresolved stub.

use indexmap::IndexMap;

use super::types::Referenceable;

/// Looks `reference` up in one components section.
#[must_use]
pub fn resolve<'a, T>(
    reference: &str,
    section: &str,
    components: &'a IndexMap<String, T>,
) -> Option<&'a T> {
    let resolved = component_name(reference, section).and_then(|name| components.get(&name));
    if resolved.is_none() {
        tracing::debug!(reference, section, "unresolvable $ref, keeping stub");
    }
    resolved
}

/// Follows a single `$ref` hop, or returns the object itself when it is inline
/// or the reference cannot be resolved.
#[must_use]
pub fn resolve_or_self<'a, T: Referenceable>(
    item: &'a T,
    section: &str,
    components: &'a IndexMap<String, T>,
) -> &'a T {
    item.reference()
        .and_then(|reference| resolve(reference, section, components))
        .unwrap_or(item)
}

/// Extracts `<name>` from `#/components/<section>/<name>`, unescaping JSON
/// pointer tokens (`~1` is `/`, `~0` is `~`).
fn component_name(reference: &str, section: &str) -> Option<String> {
    let rest = reference.strip_prefix("#/components/")?;
    let name = rest.strip_prefix(section)?.strip_prefix('/')?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(name.replace("~1", "/").replace("~0", "~"))
}
