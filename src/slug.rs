use unicode_normalization::UnicodeNormalization;

/// Derives the lower-case, hyphen-separated image seed for a product name.
/// Accents are stripped; anything outside `[a-z0-9-]` is dropped.
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(|c| c.is_ascii() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let hyphenated: String = folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    hyphenated.split('-').filter(|part| !part.is_empty()).collect::<Vec<_>>().join("-")
}

/// Seed for the display image of a product. Names that fold to nothing
/// (non-Latin scripts) are seeded from their code points instead.
pub fn image_seed(name: &str) -> String {
    let slug = slugify(name);
    if !slug.is_empty() {
        return slug;
    }
    let seed = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(16)
        .map(|c| format!("u{:x}", c as u32))
        .collect::<Vec<_>>()
        .join("-");
    if seed.is_empty() {
        INITIAL_IMAGE_SEED.to_string()
    } else {
        seed
    }
}

/// Seed shown before the first submission.
pub const INITIAL_IMAGE_SEED: &str = "initial";

/// Maps a slug to a display URL. External to the generation core.
pub trait ImageUrlProvider: Send + Sync {
    fn url_for(&self, slug: &str) -> String;
}

pub struct PicsumImages {
    base_url: String,
}

impl PicsumImages {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }
}

impl ImageUrlProvider for PicsumImages {
    fn url_for(&self, slug: &str) -> String {
        format!("{}/seed/{}/1024/768", self.base_url, slug)
    }
}
