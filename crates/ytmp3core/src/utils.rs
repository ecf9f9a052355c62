use crate::config::audio;

/// Экранирует имя файла, заменяя символы, недопустимые в файловых системах.
///
/// Path separators, Windows-reserved characters and control characters become
/// `_`, double quotes become `'`. Leading/trailing whitespace and dots are
/// trimmed; an empty result becomes `unnamed`.
///
/// # Example
///
/// ```
/// use ytmp3core::utils::escape_filename;
///
/// assert_eq!(escape_filename("AC/DC: Back in Black"), "AC_DC_ Back in Black");
/// assert_eq!(escape_filename("  ...  "), "unnamed");
/// ```
pub fn escape_filename(filename: &str) -> String {
    let mut result = String::with_capacity(filename.len());

    for c in filename.chars() {
        match c {
            '/' | '\\' => result.push('_'),
            ':' | '*' | '?' | '<' | '>' | '|' => result.push('_'),
            '"' => result.push('\''),
            c if c.is_control() => result.push('_'),
            _ => result.push(c),
        }
    }

    let result = result.trim_matches(|c: char| c.is_whitespace() || c == '.');

    if result.is_empty() {
        "unnamed".to_string()
    } else {
        result.to_string()
    }
}

/// Download name for an extracted track: the title if there is one, else the id.
///
/// ```
/// use ytmp3core::utils::attachment_filename;
///
/// assert_eq!(attachment_filename(Some("Example Song"), "abc123"), "Example Song.mp3");
/// assert_eq!(attachment_filename(None, "abc123"), "abc123.mp3");
/// ```
pub fn attachment_filename(title: Option<&str>, id: &str) -> String {
    let stem = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(id);
    format!("{}.{}", escape_filename(stem), audio::CODEC)
}

/// `Content-Disposition` value for an attachment.
///
/// ASCII names go out as a plain quoted `filename`. Anything else also gets an
/// RFC 5987 `filename*` so browsers keep the original characters, with an
/// ASCII-only `filename` fallback for older clients.
pub fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{}\"", filename.replace('\\', "_"));
    }

    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() && c != '\\' { c } else { '_' })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}
