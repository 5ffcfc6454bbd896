//! Static résumé data the shell serves.
//!
//! A profile is read-only for the lifetime of an interpreter. The built-in
//! one describes the site owner; `Profile::load_from_file` swaps in another.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub current_role: String,
    pub location: String,
    pub email: String,
    #[serde(default)]
    pub links: Links,
    pub summary: String,
    #[serde(default)]
    pub skills: SkillGroups,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub education: Education,
    #[serde(default)]
    pub awards: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub topmate: Option<String>,
}

impl Links {
    /// Labelled links in display order, skipping unset ones.
    pub fn labelled(&self) -> Vec<(&'static str, &str)> {
        [
            ("LinkedIn", &self.linkedin),
            ("GitHub", &self.github),
            ("Blog", &self.blog),
            ("Topmate", &self.topmate),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroups {
    #[serde(default)]
    pub leadership: Vec<String>,
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
}

impl SkillGroups {
    /// Every skill, group by group.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.leadership
            .iter()
            .chain(&self.technical)
            .chain(&self.domains)
            .map(String::as_str)
    }

    pub fn groups(&self) -> [(&'static str, &[String]); 3] {
        [
            ("Leadership", self.leadership.as_slice()),
            ("Technical", self.technical.as_slice()),
            ("Domains", self.domains.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default)]
    pub location: String,
}

impl std::fmt::Display for Education {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {} ({})", self.degree, self.institution, self.period)
    }
}

impl Profile {
    /// Session user name: the lowercased name with all whitespace removed.
    pub fn user_identity(&self) -> String {
        self.name
            .split_whitespace()
            .collect::<String>()
            .to_lowercase()
    }

    /// Load a profile from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let profile: Profile = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        if profile.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        Ok(profile)
    }

    /// The profile the site ships with.
    pub fn builtin() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            name: "Shivendra Soni".to_string(),
            title: "Engineering & AI Leader".to_string(),
            current_role: "Associate Director of AI at HighLevel".to_string(),
            location: "Pune, Maharashtra, India".to_string(),
            email: "shivendrasoni91@gmail.com".to_string(),
            links: Links {
                linkedin: Some("https://linkedin.com/in/shivendrasoni".to_string()),
                github: Some("https://github.com/shivendrasoni".to_string()),
                blog: Some("https://medium.com/@shivendrasoni".to_string()),
                topmate: Some("https://topmate.io/shivendra".to_string()),
            },
            summary: "Associate Director of AI at HighLevel, leading a team of around 10 brilliant \
                      engineers in AI initiatives. Previously led 35+ engineers at AmberStudent in \
                      global student accommodation solutions. Experienced with Phonepe, Flipkart, \
                      Mindtickle, SAP Labs. B.Tech from IIIT, passionate about AI, Data Science, LLM \
                      development, and fostering collaborative engineering culture. Active \
                      researcher in AI transparency and agent identification protocols."
                .to_string(),
            skills: SkillGroups {
                leadership: strings(&[
                    "Team Leadership",
                    "Strategic Thinking",
                    "Technical Design",
                    "Communication",
                    "Mentoring",
                ]),
                technical: strings(&[
                    "AI/ML",
                    "LLM Development",
                    "Vector Databases",
                    "System Architecture",
                    "Data Science",
                    "Cloud Computing",
                    "Microservices",
                ]),
                domains: strings(&[
                    "FinTech",
                    "E-commerce",
                    "EdTech",
                    "PropTech",
                    "SaaS",
                    "AI Security",
                ]),
            },
            experience: vec![
                Experience {
                    company: "HighLevel".to_string(),
                    role: "Associate Director of AI".to_string(),
                    period: "Jan 2025 - Present".to_string(),
                    location: "India".to_string(),
                    highlights: strings(&[
                        "Leading AI initiatives and strategy for the platform",
                        "Building AI-powered marketing automation solutions",
                        "Driving innovation in customer engagement technologies",
                    ]),
                },
                Experience {
                    company: "Amber (AmberStudent)".to_string(),
                    role: "Associate Director of Engineering".to_string(),
                    period: "Apr 2024 - Jan 2025".to_string(),
                    location: "Pune, India".to_string(),
                    highlights: strings(&[
                        "Led AI-first initiatives across the platform",
                        "Built comprehensive performance dashboards",
                        "Managed cross-functional engineering teams",
                        "Drove technical strategy for global expansion",
                    ]),
                },
                Experience {
                    company: "Amber (AmberStudent)".to_string(),
                    role: "Senior Software Engineering Manager".to_string(),
                    period: "Jan 2023 - May 2024".to_string(),
                    location: "Pune, India".to_string(),
                    highlights: strings(&[
                        "Scaled engineering team from 5 to 40+ members",
                        "Led mobile app development with 200k+ downloads",
                        "Spearheaded China market entry technical initiatives",
                        "Implemented agile processes and engineering best practices",
                    ]),
                },
                Experience {
                    company: "Previous Experience".to_string(),
                    role: "Senior Engineering Roles".to_string(),
                    period: "2014 - 2023".to_string(),
                    location: "India".to_string(),
                    highlights: strings(&[
                        "PhonePe - Led payment processing systems",
                        "Flipkart - E-commerce platform development",
                        "Mindtickle - SaaS platform engineering",
                        "SAP Labs - Enterprise software solutions",
                    ]),
                },
            ],
            projects: vec![
                Project {
                    title: "Infrajam.com".to_string(),
                    category: "SaaS".to_string(),
                    description: "Architect cloud infrastructure visually with AI. Design \
                                  diagrams, generate cost estimates, and provision resources via \
                                  Terraform in a unified, intelligent workflow."
                        .to_string(),
                    technologies: strings(&[
                        "AI",
                        "Terraform",
                        "Cloud Architecture",
                        "Cost Optimization",
                    ]),
                    impact: "Accelerates infrastructure delivery from design to deployment with \
                             AI-driven automation"
                        .to_string(),
                },
                Project {
                    title: "Vector Cache".to_string(),
                    category: "Open Source".to_string(),
                    description: "A streamlined Python library that enhances LLM query \
                                  performance through semantic caching, making responses faster \
                                  and more cost-effective."
                        .to_string(),
                    technologies: strings(&[
                        "Python",
                        "LLM",
                        "Semantic Caching",
                        "Vector Databases",
                    ]),
                    impact: "Reduces LLM costs and response times through semantic similarity \
                             caching"
                        .to_string(),
                },
                Project {
                    title: "AI Transparency Markup (AITM)".to_string(),
                    category: "Self Research".to_string(),
                    description: "A protocol for AI Agent self-identification in text and voice \
                                  interactions, promoting transparency in AI communications."
                        .to_string(),
                    technologies: strings(&["AI/ML", "Protocol Design", "Voice Recognition", "NLP"]),
                    impact: "Published research on AI transparency and agent identification"
                        .to_string(),
                },
            ],
            education: Education {
                degree: "B.Tech in Information Technology".to_string(),
                institution: "Indian Institute of Information Technology".to_string(),
                period: "2010-2014".to_string(),
                location: "India".to_string(),
            },
            awards: strings(&[
                "First Runners Up - What the Hack 2.0",
                "Won 1st prize at Go-hack '17 - Gojek",
                "Intel IoT Roadshow Finalist",
                "ET Power of Ideas Top 50",
                "Won .Net Idea Innovation Challenge - IIT Delhi",
                "Multi-Dimensional Visual Analytics Patent - US 20170039741",
            ]),
        }
    }
}
