//! "Save as file": a small HTML document that redirects back to the game
//! link, named after the day it was saved.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub file_name: String,
    pub contents: String,
}

/// Builds the redirect document for `href`, which should be absolute: the
/// file is opened from disk, where a bare query string resolves to itself.
pub fn save_document(href: &str, date: NaiveDate) -> SavedDocument {
    let link = escape_attr(href);
    let script = escape_js(href);
    SavedDocument {
        file_name: format!("Chess ({}-{}-{}).html", date.year(), date.month(), date.day()),
        contents: format!(
            "<!DOCTYPE html><h2>Click <a href=\"{link}\">here</a> if not redirected...</h2>\
             <script>window.onload=()=>{{location.assign(\"{script}\");}}</script>"
        ),
    }
}

fn escape_attr(href: &str) -> String {
    href.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// Contents of a double-quoted string inside <script>; entities are not decoded there.
fn escape_js(href: &str) -> String {
    href.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace("</", "<\\/")
}
