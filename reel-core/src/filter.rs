use std::collections::HashSet;

/// Extensions that mark a file as a video
const VIDEO_EXTENSIONS: &[&str] = &[".mkv", ".avi", ".mp4", ".m4v"];

/// Extensions a poster image may carry
const POSTER_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

/// Suffix that turns an image into a poster for `<base>`
const POSTER_SUFFIX: &str = "-poster";

/// Default cap on entries listed per directory
pub const DEFAULT_MAX_CHILDREN: usize = 1000;

/// Rules deciding which entries make it into the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Skip names starting with `.`
    pub skip_hidden: bool,
    /// Lowercased extensions (with leading dot) of files to skip
    skip_extensions: HashSet<String>,
    /// Entries beyond this count are dropped from a directory listing
    pub max_children: usize,
}

impl Default for Filter {
    fn default() -> Self {
        Self::new(true, [".nfo", ".png"], DEFAULT_MAX_CHILDREN)
    }
}

impl Filter {
    pub fn new<I, S>(skip_hidden: bool, skip_extensions: I, max_children: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            skip_hidden,
            skip_extensions: skip_extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
            max_children,
        }
    }

    /// Filter that lets everything through, up to the default cap
    pub fn permissive() -> Self {
        Self::new(false, std::iter::empty::<&str>(), DEFAULT_MAX_CHILDREN)
    }

    pub fn with_skip_hidden(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }

    pub fn with_max_children(mut self, max_children: usize) -> Self {
        self.max_children = max_children;
        self
    }

    pub fn skip_extension(mut self, ext: &str) -> Self {
        self.skip_extensions.insert(normalize_extension(ext));
        self
    }

    pub fn skipped_extensions(&self) -> impl Iterator<Item = &str> {
        self.skip_extensions.iter().map(String::as_str)
    }

    /// Whether an entry should be left out of the index entirely
    pub fn should_skip(&self, name: &str, is_directory: bool) -> bool {
        if self.skip_hidden && name.starts_with('.') {
            return true;
        }

        if !is_directory
            && let Some(ext) = extension(name)
        {
            return self.skip_extensions.contains(&ext.to_ascii_lowercase());
        }

        false
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_ascii_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Extension of a name including the leading dot, taken from the last `.`
pub fn extension(name: &str) -> Option<&str> {
    name.rfind('.').map(|i| &name[i..])
}

/// Name with its extension removed
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) => &name[..i],
        None => name,
    }
}

/// Check if a name carries a video extension
pub fn is_video_name(name: &str) -> bool {
    extension(name).is_some_and(|ext| {
        VIDEO_EXTENSIONS
            .iter()
            .any(|video| ext.eq_ignore_ascii_case(video))
    })
}

/// Base name a poster image describes, if `name` is a poster
///
/// `Movie-poster.jpg` and `Movie-POSTER.JPEG` both yield `Movie`.
pub fn poster_base_name(name: &str) -> Option<&str> {
    let ext = extension(name)?;
    if !POSTER_EXTENSIONS
        .iter()
        .any(|poster| ext.eq_ignore_ascii_case(poster))
    {
        return None;
    }

    let stem = strip_extension(name);
    let split = stem.len().checked_sub(POSTER_SUFFIX.len())?;
    if !stem.is_char_boundary(split) || !stem[split..].eq_ignore_ascii_case(POSTER_SUFFIX) {
        return None;
    }

    Some(&stem[..split])
}
