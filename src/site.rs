//! Static site generation around the markdown core.
//!
//! Walks a content tree, turns every `.md` file into an HTML page through a
//! template, and copies everything else verbatim.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::markdown_to_html;
use crate::parser::extract_title;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Error returned when building the site fails.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A document could not be converted.
    #[error("{}: {source}", .path.display())]
    Markdown {
        path: PathBuf,
        #[source]
        source: Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Fill `template` with the converted document and its title.
///
/// Root-relative `href="/` and `src="/` references are rewritten to start
/// with `basepath`.
pub fn render_page(markdown: &str, template: &str, basepath: &str) -> Result<String, Error> {
    let content = markdown_to_html(markdown)?;
    let title = extract_title(markdown)?;

    Ok(template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content)
        .replace("href=\"/", &format!("href=\"{basepath}"))
        .replace("src=\"/", &format!("src=\"{basepath}")))
}

/// Convert a single markdown file into an HTML page at `dest`.
pub fn generate_page(
    from: &Path,
    template_path: &Path,
    dest: &Path,
    basepath: &str,
) -> Result<(), SiteError> {
    tracing::info!(from = %from.display(), to = %dest.display(), "Generating page");

    let markdown = fs::read_to_string(from).map_err(io_err(from))?;
    let template = fs::read_to_string(template_path).map_err(io_err(template_path))?;

    let html = render_page(&markdown, &template, basepath).map_err(|source| {
        SiteError::Markdown {
            path: from.to_path_buf(),
            source,
        }
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    fs::write(dest, html).map_err(io_err(dest))
}

/// Mirror `content_dir` into `dest_dir`, rendering `.md` files to `.html`.
///
/// Returns the number of pages generated.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    basepath: &str,
) -> Result<usize, SiteError> {
    fs::create_dir_all(dest_dir).map_err(io_err(dest_dir))?;

    let mut pages = 0;
    for from in sorted_entries(content_dir)? {
        let Some(name) = from.file_name() else {
            continue;
        };
        let dest = dest_dir.join(name);

        if from.is_dir() {
            pages += generate_pages_recursive(&from, template_path, &dest, basepath)?;
        } else if from.extension().is_some_and(|ext| ext == "md") {
            generate_page(&from, template_path, &dest.with_extension("html"), basepath)?;
            pages += 1;
        } else {
            fs::copy(&from, &dest).map_err(io_err(&from))?;
            tracing::info!(from = %from.display(), to = %dest.display(), "Copied file");
        }
    }
    Ok(pages)
}

/// Recursively copy `src` into `dest`, creating directories as needed.
pub fn copy_static(src: &Path, dest: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(dest).map_err(io_err(dest))?;

    for from in sorted_entries(src)? {
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dest.join(name);
        if from.is_dir() {
            copy_static(&from, &to)?;
        } else {
            tracing::info!(from = %from.display(), to = %to.display(), "Copying static file");
            fs::copy(&from, &to).map_err(io_err(&from))?;
        }
    }
    Ok(())
}

/// Rebuild the public directory from scratch.
///
/// Returns the number of pages generated.
pub fn build_site(config: &Config) -> Result<usize, SiteError> {
    let paths = &config.paths;

    if paths.public.exists() {
        tracing::info!(path = %paths.public.display(), "Deleting public directory");
        fs::remove_dir_all(&paths.public).map_err(io_err(&paths.public))?;
    }

    if paths.static_dir.is_dir() {
        copy_static(&paths.static_dir, &paths.public)?;
    } else {
        tracing::warn!(path = %paths.static_dir.display(), "Static directory not found, skipping");
    }

    generate_pages_recursive(
        &paths.content,
        &paths.template,
        &paths.public,
        &config.site.basepath,
    )
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(io_err(dir))?;
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PathsConfig, SiteConfig};
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = r#"<title>{{ Title }}</title><link href="/index.css"><main>{{ Content }}</main>"#;

    #[test]
    fn render_page_fills_template() {
        let html = render_page("# Hi\n\n[home](/) ![logo](/logo.png)", TEMPLATE, "/blog/").unwrap();
        assert_eq!(
            html,
            r#"<title>Hi</title><link href="/blog/index.css"><main><div><h1>Hi</h1><p><a href="/blog/">home</a> <img src="/blog/logo.png" alt="logo"></img></p></div></main>"#
        );
    }

    #[test]
    fn render_page_requires_title() {
        assert_eq!(
            render_page("no heading here", TEMPLATE, "/"),
            Err(Error::MissingTitle)
        );
    }

    #[test]
    fn build_site_end_to_end() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path();

        fs::create_dir_all(dir.join("content/blog")).unwrap();
        fs::create_dir_all(dir.join("static/images")).unwrap();
        fs::create_dir_all(dir.join("docs")).unwrap();
        fs::write(dir.join("docs/stale.html"), "old").unwrap();
        fs::write(dir.join("content/index.md"), "# Home\n\nWelcome").unwrap();
        fs::write(dir.join("content/blog/post.md"), "# Post\n\n- one\n- two").unwrap();
        fs::write(dir.join("content/blog/photo.jpg"), "jpg").unwrap();
        fs::write(dir.join("static/index.css"), "body {}").unwrap();
        fs::write(dir.join("static/images/logo.png"), "png").unwrap();
        fs::write(dir.join("template.html"), TEMPLATE).unwrap();

        let config = Config {
            paths: PathsConfig {
                content: dir.join("content"),
                static_dir: dir.join("static"),
                public: dir.join("docs"),
                template: dir.join("template.html"),
            },
            site: SiteConfig::default(),
        };

        assert_eq!(build_site(&config).unwrap(), 2);

        let public = dir.join("docs");
        assert!(!public.join("stale.html").exists());
        assert_eq!(fs::read_to_string(public.join("index.css")).unwrap(), "body {}");
        assert_eq!(fs::read_to_string(public.join("images/logo.png")).unwrap(), "png");
        assert_eq!(fs::read_to_string(public.join("blog/photo.jpg")).unwrap(), "jpg");
        assert_eq!(
            fs::read_to_string(public.join("blog/post.html")).unwrap(),
            r#"<title>Post</title><link href="/index.css"><main><div><h1>Post</h1><ul><li>one</li><li>two</li></ul></div></main>"#
        );
        assert!(public.join("index.html").exists());
    }

    #[test]
    fn bad_document_reports_its_path() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path();
        fs::create_dir_all(dir.join("content")).unwrap();
        fs::write(dir.join("content/broken.md"), "# T\n\n**open").unwrap();
        fs::write(dir.join("template.html"), TEMPLATE).unwrap();

        let err = generate_pages_recursive(
            &dir.join("content"),
            &dir.join("template.html"),
            &dir.join("out"),
            "/",
        )
        .unwrap_err();

        match err {
            SiteError::Markdown { path, source } => {
                assert_eq!(path, dir.join("content/broken.md"));
                assert!(matches!(source, Error::MalformedDelimiter { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
