use crate::application::config::models::SlotConfig;
use crate::application::countdown::display::DisplaySink;
use crate::common::error::{CountdownError, Result};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// HTML document whose elements are addressed by their `id` attribute. Writing
/// a slot replaces the content of the element with that id; `present` saves the
/// page.
pub struct PageDisplay {
    document: String,
    output: Option<PathBuf>,
}

impl PageDisplay {
    pub fn new(document: impl Into<String>, output: Option<PathBuf>) -> Self {
        Self {
            document: document.into(),
            output,
        }
    }

    pub fn from_template_file(template: &Path, output: Option<PathBuf>) -> Result<Self> {
        let document = fs::read_to_string(template).map_err(|e| {
            CountdownError::DisplayError(format!(
                "Failed to read page template '{}': {}",
                template.display(),
                e
            ))
        })?;
        Ok(Self::new(document, output))
    }

    /// Page with one element per slot.
    pub fn with_default_page(slots: &SlotConfig, output: Option<PathBuf>) -> Self {
        Self::new(default_page(slots), output)
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// Raw content of the element with `id`.
    pub fn element_content(&self, id: &str) -> Option<&str> {
        element_content_range(&self.document, id).map(|range| &self.document[range])
    }
}

impl DisplaySink for PageDisplay {
    fn set_text(&mut self, slot: &str, text: &str) -> Result<()> {
        let range = element_content_range(&self.document, slot).ok_or_else(|| {
            CountdownError::DisplayError(format!("No element with id '{}' in page", slot))
        })?;
        self.document.replace_range(range, &escape_html(text));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if let Some(ref path) = self.output {
            fs::write(path, &self.document).map_err(|e| {
                CountdownError::DisplayError(format!(
                    "Failed to write page '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

/// Byte range between the opening and closing tag of the element carrying
/// `id`. Elements nested inside a tag of the same name are not supported.
fn element_content_range(document: &str, id: &str) -> Option<Range<usize>> {
    let attr = find_id_attribute(document, id)?;
    let tag_start = document[..attr].rfind('<')?;
    let tag_name: String = document[tag_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if tag_name.is_empty() {
        return None;
    }

    let open_end = attr + document[attr..].find('>')? + 1;
    if document[..open_end].ends_with("/>") {
        return None;
    }

    let closing = format!("</{}>", tag_name);
    let close_start = open_end + document[open_end..].find(&closing)?;
    Some(open_end..close_start)
}

fn find_id_attribute(document: &str, id: &str) -> Option<usize> {
    for quote in ['"', '\''] {
        let needle = format!("id={}{}{}", quote, id, quote);
        let mut from = 0;
        while let Some(pos) = document[from..].find(&needle) {
            let at = from + pos;
            // Skip data-id="..." and similar
            if document[..at].ends_with(|c: char| c.is_ascii_whitespace()) {
                return Some(at);
            }
            from = at + needle.len();
        }
    }
    None
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn default_page(slots: &SlotConfig) -> String {
    let mut cells = String::new();
    for name in slots.numeric() {
        cells.push_str(&format!(
            "      <div class=\"cell\"><span id=\"{name}\">--</span><small>{name}</small></div>\n"
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         \x20 <meta charset=\"utf-8\">\n\
         \x20 <meta http-equiv=\"refresh\" content=\"1\">\n\
         \x20 <title>Countdown</title>\n\
         </head>\n\
         <body>\n\
         \x20 <div class=\"countdown\">\n\
         {cells}\
         \x20 </div>\n\
         \x20 <p id=\"{message}\"></p>\n\
         </body>\n\
         </html>\n",
        cells = cells,
        message = slots.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<p data-id="hari">decoy</p>
<span class="num" id="hari">00</span>
<span id='jam'>00</span>
<b id="menit"><i>old</i></b>
<br id="detik"/>
<p id="demo"></p>
</body></html>"#;

    #[test]
    fn test_set_text_replaces_element_content() {
        let mut page = PageDisplay::new(PAGE, None);
        page.set_text("hari", "05").unwrap();
        page.set_text("jam", "23").unwrap();
        page.set_text("menit", "59").unwrap();

        assert_eq!(page.element_content("hari"), Some("05"));
        assert_eq!(page.element_content("jam"), Some("23"));
        assert_eq!(page.element_content("menit"), Some("59"));
        assert!(page.document().contains(r#"<p data-id="hari">decoy</p>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut page = PageDisplay::new(PAGE, None);
        page.set_text("demo", "<b>&done</b>").unwrap();
        assert_eq!(
            page.element_content("demo"),
            Some("&lt;b&gt;&amp;done&lt;/b&gt;")
        );
    }

    #[test]
    fn test_missing_or_void_element_is_error() {
        let mut page = PageDisplay::new(PAGE, None);
        assert!(page.set_text("tahun", "01").is_err());
        assert!(page.set_text("detik", "01").is_err());
    }

    #[test]
    fn test_default_page_has_every_slot() {
        let slots = SlotConfig::default();
        let page = PageDisplay::with_default_page(&slots, None);
        for name in slots.numeric() {
            assert_eq!(page.element_content(name), Some("--"));
        }
        assert_eq!(page.element_content("demo"), Some(""));
    }

    #[test]
    fn test_present_writes_output() {
        let output = std::env::temp_dir().join(format!(
            "countdown_page_unit_{}.html",
            std::process::id()
        ));
        let mut page = PageDisplay::new(PAGE, Some(output.clone()));
        page.set_text("demo", "EXPIRED").unwrap();
        page.present().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains(r#"<p id="demo">EXPIRED</p>"#));
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a\"b'c"), "a&quot;b&#39;c");
        assert_eq!(escape_html("07"), "07");
    }
}
