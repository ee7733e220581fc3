//! Ancestry derived from Firestore document names.
//!
//! Items live at `<col>/<postal code>/<col>/<store>/items/<id>`. The store is
//! the document two levels above the item and the postal code four levels
//! above; collection names in between are not checked.

/// Where an item document sits in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAncestry<'a> {
    pub id: &'a str,
    pub store: &'a str,
    pub postal_code: &'a str,
}

/// Path below `.../documents/`, split into segments.
fn relative_segments(name: &str) -> Vec<&str> {
    let relative = name
        .split_once("/documents/")
        .map(|(_, rest)| rest)
        .unwrap_or(name);
    relative.split('/').filter(|s| !s.is_empty()).collect()
}

/// Returns `None` when the document is not nested deep enough.
pub fn item_ancestry(name: &str) -> Option<ItemAncestry<'_>> {
    let segments = relative_segments(name);
    let n = segments.len();
    if n < 5 {
        return None;
    }

    Some(ItemAncestry {
        id: segments[n - 1],
        store: segments[n - 3],
        postal_code: segments[n - 5],
    })
}

/// Last path segment of a document name.
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "projects/spark/databases/(default)/documents";

    #[test]
    fn derives_store_and_postal_code() {
        let name = format!("{ROOT}/zipcodes/22030/stores/Target/items/abc123");

        assert_eq!(
            item_ancestry(&name),
            Some(ItemAncestry {
                id: "abc123",
                store: "Target",
                postal_code: "22030",
            })
        );
    }

    #[test]
    fn ignores_collection_names() {
        let name = format!("{ROOT}/zips/20151/shops/Aldi/items/x");
        let ancestry = item_ancestry(&name).unwrap();
        assert_eq!(ancestry.store, "Aldi");
        assert_eq!(ancestry.postal_code, "20151");
    }

    #[test]
    fn shallow_documents_have_no_ancestry() {
        assert_eq!(item_ancestry(&format!("{ROOT}/items/abc")), None);
        assert_eq!(item_ancestry(&format!("{ROOT}/stores/Target/items/abc")), None);
    }

    #[test]
    fn document_id_is_last_segment() {
        assert_eq!(document_id(&format!("{ROOT}/zipcodes/22030")), "22030");
        assert_eq!(document_id("22030"), "22030");
    }
}
