//! README regeneration.
//!
//! The package `README.md` is generated: an auto-generated preamble
//! (warning comment plus badges) followed by the user-authored
//! `docs/README.md` body, verbatim. Badge rendering is a pure function of
//! the statistics record.

use crate::constants::{DEFAULT_DESCRIPTION, STATS_FILENAME};
use crate::stats::{PackageMeta, PackageStatistics};
use std::fs;
use std::path::Path;

/// The six-bucket badge color scale, red through bright green at 20-point
/// intervals.
const COLORS: [&str; 6] = [
    "red",
    "orange",
    "yellow",
    "yellowgreen",
    "green",
    "brightgreen",
];

/// Maps a percentage score onto the badge color scale. A score exactly at
/// a bucket boundary maps to the higher bucket.
#[must_use]
pub fn colormap(score: usize) -> &'static str {
    let index = score * COLORS.len() / 100;
    COLORS[index.min(COLORS.len() - 1)]
}

/// Derives the VCS and distribution aliases for a package name.
#[must_use]
pub fn get_alts(package_name: &str, dist_prefix: &str) -> (String, String) {
    let git_name = package_name.replace('_', "-");
    let dist_name = if git_name.starts_with(dist_prefix) {
        git_name.clone()
    } else {
        format!("{dist_prefix}{git_name}")
    };
    (git_name, dist_name)
}

/// Parses package identity from a `docs/README.md` body: the first heading
/// carries the name, the next non-empty line the description.
#[must_use]
pub fn parse_meta(readme: &str, dist_prefix: &str) -> Option<PackageMeta> {
    let mut name: Option<String> = None;
    let mut description = DEFAULT_DESCRIPTION.to_owned();

    for line in readme.lines() {
        if let Some(heading) = line.strip_prefix('#') {
            name = Some(heading.trim().to_lowercase().replace(' ', "_"));
        } else if name.is_some() && !line.trim().is_empty() {
            description = line.replace('_', " ").trim().to_owned();
            break;
        }
    }

    let name = name?;
    let (git_name, dist_name) = get_alts(&name, dist_prefix);
    Some(PackageMeta {
        name,
        git_name,
        dist_name,
        description,
    })
}

/// Style conformity score: the share of code lines without a violation.
fn style_score(stats: &PackageStatistics) -> Option<usize> {
    let count = stats.style.count?;
    let code = stats.lines.code;
    if code == 0 {
        return Some(100);
    }
    Some(code.saturating_sub(count) * 100 / code)
}

/// Renders the generated README preamble: warning comment plus four to
/// five badges (the style badge is omitted when the checker was
/// unavailable).
#[must_use]
pub fn render_preamble(stats: &PackageStatistics, organization: &str) -> String {
    let meta = &stats.package;
    let repo = format!("https://github.com/{organization}/{}", meta.git_name);

    let mut preamble = vec![
        "<!--\n    This file is auto generated by docguard.\n    \
         Beware: any change to this file will be overwritten at next commit.\n    \
         One should edit the docs/README.md file instead.\n-->\n"
            .to_owned(),
    ];

    let mut add_badge = |alt: &str, img: String, link: String| {
        preamble.push(format!("[![{alt}]({img})]({link})"));
    };

    if let Some(score) = style_score(stats) {
        add_badge(
            "Coding style",
            format!(
                "https://img.shields.io/badge/pep8-{score}%25-{}.svg",
                colormap(score)
            ),
            format!("{repo}/blob/master/{STATS_FILENAME}"),
        );
    }

    add_badge(
        "Code coverage",
        format!("https://codecov.io/gh/{organization}/{}/branch/master/graph/badge.svg", meta.git_name),
        format!("https://codecov.io/gh/{organization}/{}", meta.git_name),
    );

    add_badge(
        "Build status",
        format!("{repo}/actions/workflows/ci.yml/badge.svg"),
        format!("{repo}/actions"),
    );

    if let Some(doc) = &stats.doc {
        add_badge(
            "Documentation",
            format!(
                "https://img.shields.io/badge/docs-{}%25-{}.svg",
                doc.score,
                colormap(doc.score)
            ),
            format!("{repo}/blob/master/{STATS_FILENAME}"),
        );
    }

    add_badge(
        "PyPi version",
        format!("https://img.shields.io/pypi/v/{}.svg", meta.dist_name),
        format!("https://pypi.org/project/{}", meta.dist_name),
    );

    preamble.join("\n")
}

/// Writes the package README: generated preamble, a blank line, then the
/// user-authored body verbatim.
pub fn update_readme(
    package_dir: &Path,
    stats: &PackageStatistics,
    organization: &str,
    body: &str,
) -> std::io::Result<()> {
    let mut content = render_preamble(stats, organization);
    content.push_str("\n\n");
    content.push_str(body);
    fs::write(package_dir.join("README.md"), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{DocReport, PackageMeta};

    fn stats_with_doc_score(score: usize) -> PackageStatistics {
        let meta = PackageMeta {
            name: "demo_pkg".to_owned(),
            git_name: "demo-pkg".to_owned(),
            dist_name: "dg-demo-pkg".to_owned(),
            description: "Demo".to_owned(),
        };
        let mut stats = PackageStatistics::initial(meta, 0);
        stats.doc = Some(DocReport {
            score,
            tokens: 10,
            errors: 0,
            tree: crate::model::PackageTree::new("demo_pkg"),
            stats: crate::score::DocRegistry::default(),
        });
        stats
    }

    #[test]
    fn colormap_endpoints() {
        assert_eq!(colormap(0), "red");
        assert_eq!(colormap(100), "brightgreen");
    }

    #[test]
    fn colormap_boundary_maps_to_higher_bucket() {
        assert_eq!(colormap(79), "yellowgreen");
        assert_eq!(colormap(80), "green");
        assert_eq!(colormap(20), "orange");
    }

    #[test]
    fn get_alts_applies_prefix_once() {
        assert_eq!(
            get_alts("demo_pkg", "dg-"),
            ("demo-pkg".to_owned(), "dg-demo-pkg".to_owned())
        );
        assert_eq!(
            get_alts("dg_tools", "dg-"),
            ("dg-tools".to_owned(), "dg-tools".to_owned())
        );
    }

    #[test]
    fn parse_meta_reads_heading_and_description() {
        let body = "# Demo Pkg\n_A demo package_\n\n## Usage\n";
        let meta = parse_meta(body, "dg-").unwrap();
        assert_eq!(meta.name, "demo_pkg");
        assert_eq!(meta.description, "A demo package");
        assert_eq!(meta.dist_name, "dg-demo-pkg");
    }

    #[test]
    fn parse_meta_without_heading_is_none() {
        assert!(parse_meta("no heading here\n", "dg-").is_none());
    }

    #[test]
    fn preamble_has_four_badges_without_style() {
        let stats = stats_with_doc_score(100);
        let preamble = render_preamble(&stats, "acme");
        assert_eq!(preamble.matches("[![").count(), 4);
        assert!(preamble.contains("docs-100%25-brightgreen"));
        assert!(preamble.contains("https://pypi.org/project/dg-demo-pkg"));
    }

    #[test]
    fn preamble_has_five_badges_with_style() {
        let mut stats = stats_with_doc_score(50);
        stats.lines.code = 10;
        stats.style.count = Some(2);
        let preamble = render_preamble(&stats, "acme");
        assert_eq!(preamble.matches("[![").count(), 5);
        assert!(preamble.contains("pep8-80%25-green"));
    }

    #[test]
    fn readme_body_is_appended_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let stats = stats_with_doc_score(100);
        update_readme(dir.path(), &stats, "acme", "# Demo\nBody text.\n").unwrap();
        let content = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(content.starts_with("<!--"));
        assert!(content.ends_with("# Demo\nBody text.\n"));
    }
}
