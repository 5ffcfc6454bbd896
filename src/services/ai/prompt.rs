//! Building the instruction and context blocks sent with every `/ask`.

use super::{ChatMessage, CompletionRequest};
use crate::model::profile::Profile;
use std::fmt::Write as _;

/// Fixed instruction block describing the required answer shape.
pub const INSTRUCTIONS: &str = "\
You are an AI assistant embedded in a portfolio terminal. Answer questions about the \
person described in the context below, using only that context. Keep answers concise, \
professional, and friendly. If the context does not cover the question, say so.

Respond with a single JSON object and nothing else:
{
  \"answer\": string,
  \"confidence\": \"high\" | \"medium\" | \"low\",
  \"sources_used\": [string],
  \"follow_up_questions\": [string]
}
\"sources_used\" names the context sections you relied on (for example \"experience\", \
\"skills\", \"resume_data\"). \"follow_up_questions\" is optional and holds at most three \
short questions the visitor might ask next.";

/// One earlier question and the answer shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// Render the profile as the context block.
pub fn context_block(profile: &Profile) -> String {
    let mut out = String::new();
    write_context(&mut out, profile).ok();
    out.trim_end().to_string()
}

fn write_context(out: &mut String, profile: &Profile) -> std::fmt::Result {
    writeln!(out, "Name: {}", profile.name)?;
    writeln!(out, "Title: {}", profile.title)?;
    writeln!(out, "Location: {}", profile.location)?;

    let mut contact = profile.email.clone();
    for (label, url) in profile.links.labelled() {
        write!(contact, " | {}: {}", label, url).ok();
    }
    writeln!(out, "Contact: {}", contact)?;

    writeln!(out, "Summary: {}", profile.summary)?;
    writeln!(
        out,
        "Skills: {}",
        profile.skills.all().collect::<Vec<_>>().join(", ")
    )?;

    writeln!(out, "Experience:")?;
    for job in &profile.experience {
        writeln!(
            out,
            "- {} at {} ({}): {}",
            job.role,
            job.company,
            job.period,
            job.highlights.join(", ")
        )?;
    }

    if !profile.projects.is_empty() {
        writeln!(out, "Projects:")?;
        for project in &profile.projects {
            writeln!(
                out,
                "- {} ({}): {}",
                project.title, project.category, project.description
            )?;
        }
    }

    writeln!(out, "Education: {}", profile.education)?;
    writeln!(out, "Awards: {}", profile.awards.join(", "))
}

/// Assemble the request: instructions, context, replayed turns, question.
pub fn build_request(profile: &Profile, history: &[Exchange], question: &str) -> CompletionRequest {
    let mut messages = vec![
        ChatMessage::system(INSTRUCTIONS),
        ChatMessage::system(format!("Context:\n{}", context_block(profile))),
    ];

    for exchange in history {
        messages.push(ChatMessage::user(exchange.question.clone()));
        messages.push(ChatMessage::assistant(exchange.answer.clone()));
    }

    messages.push(ChatMessage::user(question));
    CompletionRequest { messages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai::Role;

    #[test]
    fn test_context_block_lists_profile_sections() {
        let context = context_block(&Profile::builtin());

        assert!(context.starts_with("Name: Shivendra Soni\n"));
        assert!(context.contains("Title: Engineering & AI Leader"));
        assert!(context.contains("Contact: shivendrasoni91@gmail.com | LinkedIn: "));
        assert!(context.contains("Skills: Team Leadership, Strategic Thinking, "));
        assert!(context.contains(
            "- Associate Director of AI at HighLevel (Jan 2025 - Present): \
             Leading AI initiatives and strategy for the platform, "
        ));
        assert!(context.contains(
            "Education: B.Tech in Information Technology, \
             Indian Institute of Information Technology (2010-2014)"
        ));
        assert!(context.contains("Awards: First Runners Up - What the Hack 2.0, "));
    }

    #[test]
    fn test_request_layout_without_history() {
        let request = build_request(&Profile::builtin(), &[], "What does he do?");
        let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();

        assert_eq!(roles, vec![Role::System, Role::System, Role::User]);
        assert_eq!(request.messages[0].content, INSTRUCTIONS);
        assert!(request.messages[1].content.starts_with("Context:\nName: "));
        assert_eq!(request.messages[2].content, "What does he do?");
    }

    #[test]
    fn test_request_replays_history_before_question() {
        let history = vec![Exchange {
            question: "Where is he based?".to_string(),
            answer: "Pune.".to_string(),
        }];
        let request = build_request(&Profile::builtin(), &history, "Since when?");
        let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();

        assert_eq!(
            roles,
            vec![Role::System, Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(request.messages[3].content, "Pune.");
        assert_eq!(request.messages[4].content, "Since when?");
    }
}
