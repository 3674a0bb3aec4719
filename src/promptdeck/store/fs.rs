use super::CardSource;
use crate::error::{DeckError, Result};
use crate::model::{Card, CardDocument};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DEFAULT_CATEGORY: &str = "Misc";
const DEFAULT_VERSION: &str = "1.0";

/// Reads the JSON card document from a local file.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CardSource for JsonFileSource {
    fn load(&self) -> Result<CardDocument> {
        let content = fs::read_to_string(&self.path).map_err(DeckError::Io)?;
        let doc = serde_json::from_str(&content).map_err(DeckError::Serialization)?;
        Ok(doc)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// One card per markdown file under a directory.
///
/// Each file may open with YAML front matter between `---` lines; the rest of
/// the file is the card content. Front matter fields map onto [`Card`] fields
/// by name. Files that cannot be read or parsed are skipped.
pub struct MarkdownDirSource {
    root: PathBuf,
}

impl MarkdownDirSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn markdown_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .collect();
        files.sort();
        files
    }

    fn load_file(&self, path: &Path) -> Result<Card> {
        let raw = fs::read_to_string(path)?;
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        parse_prompt_file(relative, &raw)
    }
}

impl CardSource for MarkdownDirSource {
    fn load(&self) -> Result<CardDocument> {
        if !self.root.is_dir() {
            return Err(DeckError::Store(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let mut cards = Vec::new();
        for path in self.markdown_files() {
            match self.load_file(&path) {
                Ok(card) => cards.push(card),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping prompt file")
                }
            }
        }
        Ok(CardDocument::new(cards))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Splits `---` delimited front matter from the body.
///
/// Returns `(None, raw)` when the file has no front matter block.
pub fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }
    (None, text)
}

/// Builds a card from a prompt file's text and its path relative to the root.
pub fn parse_prompt_file(relative: &Path, raw: &str) -> Result<Card> {
    let (front, body) = split_front_matter(raw);
    let mut card: Card = match front {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)?,
        _ => Card::default(),
    };

    card.content = body.trim().to_string();

    let stem_path = relative.with_extension("");
    let id = stem_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if card.id.is_empty() {
        card.id = id.clone();
    }
    if card.url.is_none() {
        card.url = Some(id);
    }

    if card.title.trim().is_empty() {
        card.title = first_heading(&card.content).unwrap_or_else(|| {
            relative
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
    }

    if card.category.trim().is_empty() {
        card.category = category_from_path(relative);
    }

    if card.version.trim().is_empty() {
        card.version = DEFAULT_VERSION.to_string();
    }

    Ok(card)
}

fn first_heading(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}

/// Title-cased first directory segment, or the default category for files at
/// the root.
fn category_from_path(relative: &Path) -> String {
    let mut components = relative.components();
    let first = components.next();
    if components.next().is_none() {
        return DEFAULT_CATEGORY.to_string();
    }
    first
        .map(|c| title_case(&c.as_os_str().to_string_lossy()))
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

fn title_case(segment: &str) -> String {
    segment
        .split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_file_source_reads_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        fs::write(
            &path,
            r#"{"categories": ["Code"], "prompts": [{"id": "b", "title": "Beta", "category": "Code"}]}"#,
        )
        .unwrap();

        let doc = JsonFileSource::new(&path).load().unwrap();
        assert_eq!(doc.categories, vec!["Code"]);
        assert_eq!(doc.prompts[0].title, "Beta");
    }

    #[test]
    fn json_file_source_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = JsonFileSource::new(dir.path().join("nope.json")).load();
        assert!(matches!(result, Err(DeckError::Io(_))));
    }

    #[test]
    fn json_file_source_malformed_document_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        fs::write(&path, "{ not json").unwrap();
        let result = JsonFileSource::new(&path).load();
        assert!(matches!(result, Err(DeckError::Serialization(_))));
    }

    #[test]
    fn splits_front_matter() {
        let raw = "---\ntitle: Alpha\n---\nBody text\n";
        let (front, body) = split_front_matter(raw);
        assert_eq!(front, Some("title: Alpha\n"));
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn no_front_matter_returns_whole_text() {
        let raw = "# Heading\nBody";
        assert_eq!(split_front_matter(raw), (None, raw));
    }

    #[test]
    fn unterminated_front_matter_is_treated_as_body() {
        let raw = "---\ntitle: Alpha\nBody";
        assert_eq!(split_front_matter(raw), (None, raw));
    }

    #[test]
    fn parse_prompt_file_uses_front_matter() {
        let raw = "---\ntitle: Alpha\ncategory: Writing\nmodel: GPT-4\ntags: [blog, seo]\nversion: 2.0\n---\nYou are an editor.\n";
        let card = parse_prompt_file(Path::new("writing/alpha.md"), raw).unwrap();
        assert_eq!(card.id, "writing/alpha");
        assert_eq!(card.title, "Alpha");
        assert_eq!(card.category, "Writing");
        assert_eq!(card.model.as_deref(), Some("GPT-4"));
        assert_eq!(card.tags, vec!["blog", "seo"]);
        assert_eq!(card.version, "2.0");
        assert_eq!(card.content, "You are an editor.");
    }

    #[test]
    fn parse_prompt_file_fills_defaults() {
        let raw = "# Code Review Helper\n\nReview this diff.";
        let card = parse_prompt_file(Path::new("code-tools/review.md"), raw).unwrap();
        assert_eq!(card.title, "Code Review Helper");
        assert_eq!(card.category, "Code Tools");
        assert_eq!(card.version, "1.0");
        assert_eq!(card.url.as_deref(), Some("code-tools/review"));
    }

    #[test]
    fn root_level_file_gets_default_category_and_stem_title() {
        let card = parse_prompt_file(Path::new("notes.md"), "plain body").unwrap();
        assert_eq!(card.category, "Misc");
        assert_eq!(card.title, "notes");
    }

    #[test]
    fn markdown_dir_source_loads_sorted_and_skips_bad_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("writing")).unwrap();
        fs::create_dir_all(dir.path().join("code")).unwrap();
        fs::write(
            dir.path().join("writing/b.md"),
            "---\ntitle: Beta\n---\nbody",
        )
        .unwrap();
        fs::write(
            dir.path().join("code/a.md"),
            "---\ntitle: Alpha\n---\nbody",
        )
        .unwrap();
        fs::write(dir.path().join("code/broken.md"), "---\ntitle: [unclosed\n---\n").unwrap();
        fs::write(dir.path().join("code/readme.txt"), "ignored").unwrap();

        let doc = MarkdownDirSource::new(dir.path()).load().unwrap();
        let ids: Vec<_> = doc.prompts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["code/a", "writing/b"]);
        assert_eq!(doc.prompts[0].category, "Code");
    }

    #[test]
    fn markdown_dir_source_missing_dir_is_error() {
        let dir = tempdir().unwrap();
        let result = MarkdownDirSource::new(dir.path().join("missing")).load();
        assert!(result.is_err());
    }
}
