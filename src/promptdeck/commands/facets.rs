use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CardStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// The values a user can filter on, each with the number of cards carrying
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub categories: Vec<FacetCount>,
    pub models: Vec<FacetCount>,
    pub tags: Vec<FacetCount>,
}

pub fn run(store: &CardStore) -> Result<CmdResult> {
    let facets = collect(store);
    let mut result = CmdResult::default();
    if store.is_empty() {
        result.add_message(CmdMessage::info("No prompts loaded."));
    }
    Ok(result.with_facets(facets))
}

/// Declared categories keep their declared order (a declared category with
/// no cards still shows, with a zero count); categories only seen on cards
/// follow, sorted. Models and tags are sorted by value.
pub fn collect(store: &CardStore) -> Facets {
    let mut category_counts = store.facet_counts(|c| std::iter::once(c.category.as_str()));
    let mut categories = Vec::new();
    for declared in store.categories() {
        let count = category_counts.remove(declared).unwrap_or(0);
        categories.push(FacetCount {
            value: declared.clone(),
            count,
        });
    }
    categories.extend(
        category_counts
            .into_iter()
            .map(|(value, count)| FacetCount { value, count }),
    );

    let models = store
        .facet_counts(|c| c.model.as_deref())
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect();
    let tags = store
        .facet_counts(|c| c.tags.iter().map(String::as_str))
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect();

    Facets {
        categories,
        models,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Card, CardDocument};
    use crate::store::memory::fixtures::StoreFixture;

    fn pairs(counts: &[FacetCount]) -> Vec<(&str, usize)> {
        counts.iter().map(|f| (f.value.as_str(), f.count)).collect()
    }

    #[test]
    fn counts_each_facet() {
        let store = StoreFixture::alpha_beta()
            .with_card(
                Card::new("c", "Gamma")
                    .with_category("Code")
                    .with_model("Claude")
                    .with_tags(["rust"]),
            )
            .store();
        let facets = collect(&store);
        assert_eq!(pairs(&facets.categories), vec![("Code", 2), ("Writing", 1)]);
        assert_eq!(pairs(&facets.models), vec![("Claude", 2), ("GPT-4", 1)]);
        assert_eq!(
            pairs(&facets.tags),
            vec![("blog", 1), ("review", 1), ("rust", 2), ("seo", 1)]
        );
    }

    #[test]
    fn declared_categories_come_first() {
        let doc = CardDocument {
            categories: vec!["Writing".into(), "Marketing".into()],
            prompts: vec![
                Card::new("a", "A").with_category("Code"),
                Card::new("b", "B").with_category("Writing"),
            ],
        };
        let facets = collect(&CardStore::from_document(doc));
        assert_eq!(
            pairs(&facets.categories),
            vec![("Writing", 1), ("Marketing", 0), ("Code", 1)]
        );
    }

    #[test]
    fn empty_store_has_no_facets() {
        let result = run(&CardStore::empty()).unwrap();
        assert_eq!(result.facets, Some(Facets::default()));
        assert_eq!(result.messages.len(), 1);
    }
}
