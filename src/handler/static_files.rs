//! Static file serving module
//!
//! Maps request paths onto the served root and builds the response: files,
//! index lookups, directory listings, redirects, and 404s.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::http::{mime, response};
use crate::logger;

/// Index files probed when a directory is requested.
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Outcome of mapping a request path onto the filesystem.
#[derive(Debug)]
enum Resolution {
    File(PathBuf),
    Listing(PathBuf),
    Redirect(String),
    NotFound,
}

/// Serve a GET/HEAD request for `req_path` out of `root`.
pub async fn serve(root: &Path, req_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match resolve(root, req_path) {
        Resolution::File(path) => serve_file(&path, req_path, is_head).await,
        Resolution::Listing(dir) => serve_listing(&dir, req_path, is_head).await,
        Resolution::Redirect(location) => response::build_redirect_response(&location),
        Resolution::NotFound => response::build_404_response(),
    }
}

/// Map a request path onto the filesystem.
///
/// The canonicalized result must stay under the served root; anything that
/// escapes it resolves to not-found. Directories without a trailing slash
/// redirect, directories with one get an index file or a listing.
fn resolve(root: &Path, req_path: &str) -> Resolution {
    let clean = req_path.trim_start_matches('/').replace("..", "");
    let target = root.join(clean.trim_start_matches('/'));

    let Ok(root_canonical) = root.canonicalize() else {
        logger::log_request_error("Served directory is not accessible", Some(req_path));
        return Resolution::NotFound;
    };
    let Ok(target_canonical) = target.canonicalize() else {
        return Resolution::NotFound;
    };
    if !target_canonical.starts_with(&root_canonical) {
        logger::log_request_error("Request path escapes the served directory", Some(req_path));
        return Resolution::NotFound;
    }

    if target_canonical.is_dir() {
        if !req_path.ends_with('/') {
            return Resolution::Redirect(format!("{req_path}/"));
        }
        for index in INDEX_FILES {
            let candidate = target_canonical.join(index);
            if candidate.is_file() {
                return Resolution::File(candidate);
            }
        }
        return Resolution::Listing(target_canonical);
    }

    Resolution::File(target_canonical)
}

/// Read a file and build its response.
async fn serve_file(path: &Path, req_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::content_type(path.extension().and_then(|e| e.to_str()));
            response::build_file_response(content, content_type, is_head)
        }
        Err(e) => {
            logger::log_request_error(
                &format!("Failed to read file '{}': {e}", path.display()),
                Some(req_path),
            );
            response::build_404_response()
        }
    }
}

/// Render and serve the directory listing page.
async fn serve_listing(dir: &Path, req_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match render_listing(dir, req_path).await {
        Ok(html) => response::build_html_response(html, is_head),
        Err(e) => {
            logger::log_request_error(&format!("Failed to list directory: {e}"), Some(req_path));
            response::build_404_response()
        }
    }
}

/// Build the default listing page: sorted entries, subdirectories marked
/// with a trailing slash, names escaped and hyperlinked.
async fn render_listing(dir: &Path, req_path: &str) -> std::io::Result<String> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let title = escape_html(&format!("Directory listing for {req_path}"));
    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for name in &names {
        let name = escape_html(name);
        html.push_str(&format!("<li><a href=\"{name}\">{name}</a></li>\n"));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

/// Escape text for inclusion in HTML.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn root_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for file in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                std_fs::create_dir_all(parent).expect("create parent");
            }
            std_fs::write(path, b"content").expect("write fixture");
        }
        dir
    }

    #[test]
    fn resolves_existing_file() {
        let root = root_with(&["hello.txt"]);
        match resolve(root.path(), "/hello.txt") {
            Resolution::File(path) => assert!(path.ends_with("hello.txt")),
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let root = root_with(&[]);
        assert!(matches!(
            resolve(root.path(), "/does-not-exist.txt"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn directory_without_slash_redirects() {
        let root = root_with(&["subdir/page.html"]);
        match resolve(root.path(), "/subdir") {
            Resolution::Redirect(location) => assert_eq!(location, "/subdir/"),
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn directory_with_index_serves_it() {
        let root = root_with(&["subdir/index.html"]);
        match resolve(root.path(), "/subdir/") {
            Resolution::File(path) => assert!(path.ends_with("subdir/index.html")),
            other => panic!("expected index file, got {other:?}"),
        }
    }

    #[test]
    fn directory_without_index_lists() {
        let root = root_with(&["subdir/page.html"]);
        assert!(matches!(
            resolve(root.path(), "/subdir/"),
            Resolution::Listing(_)
        ));
    }

    #[test]
    fn parent_segments_cannot_escape_the_root() {
        let outer = tempfile::tempdir().expect("tempdir");
        std_fs::write(outer.path().join("secret.txt"), b"secret").expect("write secret");
        let root = outer.path().join("root");
        std_fs::create_dir(&root).expect("create root");

        assert!(matches!(
            resolve(&root, "/../secret.txt"),
            Resolution::NotFound
        ));
        assert!(matches!(
            resolve(&root, "/..%2Fsecret.txt"),
            Resolution::NotFound
        ));
    }

    #[tokio::test]
    async fn listing_is_sorted_and_marks_directories() {
        let root = root_with(&["b.txt", "a.txt", "sub/inner.txt"]);
        let html = render_listing(root.path(), "/").await.expect("listing");
        let a = html.find("a.txt").expect("a.txt listed");
        let b = html.find("b.txt").expect("b.txt listed");
        assert!(a < b, "entries are not sorted");
        assert!(html.contains("sub/"));
        assert!(html.contains("Directory listing for /"));
    }

    #[test]
    fn html_escaping_covers_markup_characters() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_html("plain.txt"), "plain.txt");
    }
}
