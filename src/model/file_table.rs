//! The read-only "home directory" the shell commands operate on.
//!
//! Seven markdown files are rendered once from the profile when the
//! interpreter is built. Names are case-sensitive and the set never changes.

use crate::model::profile::Profile;
use std::fmt::Write as _;

/// File names in definition order.
pub const FILE_NAMES: [&str; 7] = [
    "about.md",
    "experience.md",
    "skills.md",
    "contact.md",
    "awards.md",
    "education.md",
    "README.md",
];

const LONG_LISTING_DATE: &str = "Jan 15 10:30";
const LONG_LISTING_PERMISSIONS: &str = "-rw-r--r--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    pub name: &'static str,
    pub content: String,
}

impl VirtualFile {
    pub fn lines(&self) -> std::str::Split<'_, char> {
        self.content.split('\n')
    }

    /// First `n` lines, newline-joined.
    pub fn head(&self, n: usize) -> String {
        self.lines().take(n).collect::<Vec<_>>().join("\n")
    }

    /// Last `n` lines, newline-joined.
    pub fn tail(&self, n: usize) -> String {
        let lines: Vec<&str> = self.lines().collect();
        let start = lines.len().saturating_sub(n);
        lines[start..].join("\n")
    }

    pub fn word_count(&self) -> WordCount {
        WordCount {
            lines: self.lines().count(),
            words: self.content.split_whitespace().count(),
            chars: self.content.chars().count(),
        }
    }
}

/// Counts reported by `wc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCount {
    pub lines: usize,
    pub words: usize,
    pub chars: usize,
}

impl WordCount {
    pub fn render(&self, file_name: &str) -> String {
        format!(
            "{:>8}{:>7}{:>7} {}",
            self.lines, self.words, self.chars, file_name
        )
    }
}

/// One `grep` hit, with a 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrepMatch<'a> {
    pub file: &'a str,
    pub line_number: usize,
    pub line: &'a str,
}

impl std::fmt::Display for GrepMatch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line_number, self.line)
    }
}

#[derive(Debug, Clone)]
pub struct FileTable {
    files: Vec<VirtualFile>,
}

impl FileTable {
    pub fn from_profile(profile: &Profile) -> Self {
        let files = FILE_NAMES
            .iter()
            .map(|&name| VirtualFile {
                name,
                content: render_file(name, profile),
            })
            .collect();
        Self { files }
    }

    pub fn files(&self) -> &[VirtualFile] {
        &self.files
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.files.iter().map(|file| file.name)
    }

    pub fn get(&self, name: &str) -> Option<&VirtualFile> {
        self.files.iter().find(|file| file.name == name)
    }

    /// `ls -l` rows: permissions, owner, right-aligned byte length, date, name.
    pub fn long_listing(&self, owner: &str) -> Vec<String> {
        self.files
            .iter()
            .map(|file| {
                format!(
                    "{}  1 {} {} {:>4} {} {}",
                    LONG_LISTING_PERMISSIONS,
                    owner,
                    owner,
                    file.content.len(),
                    LONG_LISTING_DATE,
                    file.name
                )
            })
            .collect()
    }

    /// Case-insensitive substring search over every line, in table then line order.
    pub fn grep(&self, term: &str) -> Vec<GrepMatch<'_>> {
        let needle = term.to_lowercase();
        self.files
            .iter()
            .flat_map(|file| {
                let needle = needle.clone();
                file.lines()
                    .enumerate()
                    .filter(move |(_, line)| line.to_lowercase().contains(&needle))
                    .map(move |(index, line)| GrepMatch {
                        file: file.name,
                        line_number: index + 1,
                        line,
                    })
            })
            .collect()
    }

    /// Files whose name or content contains `term`, ignoring case.
    pub fn find(&self, term: &str) -> Vec<&'static str> {
        let needle = term.to_lowercase();
        self.files
            .iter()
            .filter(|file| {
                file.name.to_lowercase().contains(&needle)
                    || file.content.to_lowercase().contains(&needle)
            })
            .map(|file| file.name)
            .collect()
    }
}

fn render_file(name: &str, profile: &Profile) -> String {
    let mut out = String::new();
    let rendered = match name {
        "about.md" => render_about(&mut out, profile),
        "experience.md" => render_experience(&mut out, profile),
        "skills.md" => render_skills(&mut out, profile),
        "contact.md" => render_contact(&mut out, profile),
        "awards.md" => render_awards(&mut out, profile),
        "education.md" => render_education(&mut out, profile),
        _ => render_readme(&mut out, profile),
    };
    rendered.ok();
    out.trim_end().to_string()
}

fn render_about(out: &mut String, profile: &Profile) -> std::fmt::Result {
    writeln!(out, "# {}", profile.name)?;
    writeln!(out)?;
    writeln!(out, "{}", profile.title)?;
    if !profile.current_role.is_empty() {
        writeln!(out, "Currently: {}", profile.current_role)?;
    }
    writeln!(out, "Location: {}", profile.location)?;
    writeln!(out)?;
    writeln!(out, "{}", profile.summary)
}

fn render_experience(out: &mut String, profile: &Profile) -> std::fmt::Result {
    writeln!(out, "# Experience")?;
    for job in &profile.experience {
        writeln!(out)?;
        writeln!(out, "## {} @ {}", job.role, job.company)?;
        if job.location.is_empty() {
            writeln!(out, "{}", job.period)?;
        } else {
            writeln!(out, "{} | {}", job.period, job.location)?;
        }
        for highlight in &job.highlights {
            writeln!(out, "- {}", highlight)?;
        }
    }
    Ok(())
}

fn render_skills(out: &mut String, profile: &Profile) -> std::fmt::Result {
    writeln!(out, "# Skills")?;
    for (group, skills) in profile.skills.groups() {
        if skills.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "## {}", group)?;
        for skill in skills {
            writeln!(out, "- {}", skill)?;
        }
    }
    Ok(())
}

fn render_contact(out: &mut String, profile: &Profile) -> std::fmt::Result {
    writeln!(out, "# Contact")?;
    writeln!(out)?;
    writeln!(out, "Email: {}", profile.email)?;
    for (label, url) in profile.links.labelled() {
        writeln!(out, "{}: {}", label, url)?;
    }
    Ok(())
}

fn render_awards(out: &mut String, profile: &Profile) -> std::fmt::Result {
    writeln!(out, "# Awards")?;
    writeln!(out)?;
    for award in &profile.awards {
        writeln!(out, "- {}", award)?;
    }
    Ok(())
}

fn render_education(out: &mut String, profile: &Profile) -> std::fmt::Result {
    let education = &profile.education;
    writeln!(out, "# Education")?;
    writeln!(out)?;
    writeln!(out, "{}", education.degree)?;
    writeln!(out, "{}", education.institution)?;
    if education.location.is_empty() {
        writeln!(out, "{}", education.period)
    } else {
        writeln!(out, "{} | {}", education.period, education.location)
    }
}

fn render_readme(out: &mut String, profile: &Profile) -> std::fmt::Result {
    writeln!(out, "# {}'s portfolio shell", profile.name)?;
    writeln!(out)?;
    writeln!(out, "Browse the files here with the usual tools:")?;
    writeln!(out, "  ls -l, cat <file>, head <file>, grep <term>, tree")?;
    writeln!(out)?;
    writeln!(out, "Or ask the AI assistant anything:")?;
    writeln!(out, "  /ask <question>")?;
    writeln!(out)?;
    writeln!(out, "Type 'help' for the full command list.")
}
