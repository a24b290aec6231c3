//! Task-specific instructions for the completion model
//!
//! Every template ends with the exact JSON shape the response parser
//! expects. Whether the model complies is checked by the parser, not here.

use indoc::formatdoc;
use stt::Transcript;

use crate::rubric::Rubric;
use crate::task::{AnalysisKind, TaskContext};

/// Assemble the prompt for `task` around the learner's transcript
pub fn build_prompt(task: &TaskContext, transcript: &Transcript) -> String {
    let transcript = transcript.as_str();
    let metrics = metrics_schema(&task.metric_keys());

    match task {
        TaskContext::Feedback {
            topic,
            context,
            previous_exchanges,
        } => feedback(topic, context.as_deref(), previous_exchanges, transcript, &metrics),
        TaskContext::Story { story_prompt, rubric } => story(story_prompt, rubric, transcript, &metrics),
        TaskContext::Conversation {
            scenario,
            role,
            previous_exchanges,
        } => conversation(scenario, role, previous_exchanges, transcript, &metrics),
        TaskContext::Analysis { expected_text, kind } => analysis(*kind, expected_text, transcript, &metrics),
    }
}

fn feedback(topic: &str, context: Option<&str>, exchanges: &[String], transcript: &str, metrics: &str) -> String {
    let history = history(exchanges);
    let context = context.map(|c| format!("Context: {c}\n")).unwrap_or_default();

    formatdoc! {r#"
        {history}Topic: {topic}
        {context}User's response: "{transcript}"

        You are an expert debate and speaking coach. Analyze the user's response to the topic.
        Provide detailed feedback on:
        1. Argument quality and logical structure
        2. Use of evidence and examples
        3. Persuasiveness and rhetoric
        4. Clarity and conciseness
        5. Potential counterarguments they should address

        Also provide a follow-up question or challenge to their position that would help them develop their argument further.

        Format the response as a JSON object with the following structure:
        {{
          "transcribedText": "The user's transcribed text",
          "overallScore": number (0-100),
          "metrics": {{
        {metrics}
          }},
          "feedback": string,
          "improvements": string[],
          "followUpQuestion": string
        }}
    "#}
}

fn story(story_prompt: &str, rubric: &Rubric, transcript: &str, metrics: &str) -> String {
    let criteria = numbered(rubric.criteria().iter().map(|c| c.label.as_str()));

    formatdoc! {r#"
        Story Prompt: "{story_prompt}"

        User's Story: "{transcript}"

        You are an expert storytelling coach. Evaluate the user's story based on the following criteria:
        {criteria}
        Format the response as a JSON object with the following structure:
        {{
          "transcribedText": "The user's transcribed story",
          "overallScore": number (0-100),
          "metrics": {{
        {metrics}
          }},
          "feedback": string,
          "improvements": string[],
          "strengths": string[]
        }}
    "#}
}

fn conversation(scenario: &str, role: &str, exchanges: &[String], transcript: &str, metrics: &str) -> String {
    let history = history(exchanges);

    formatdoc! {r#"
        {history}Scenario: {scenario}
        Your role: {role}
        User's response: "{transcript}"

        You are an expert language and communication coach. Analyze the user's response in this real-world scenario.

        First, generate a natural response that a person in your role would give to the user's statement.

        Then, evaluate the user's communication based on:
        1. Appropriateness for the context
        2. Clarity and effectiveness
        3. Use of relevant vocabulary and expressions
        4. Cultural awareness and politeness
        5. Overall communication success

        Format the response as a JSON object with the following structure:
        {{
          "transcribedText": "The user's transcribed text",
          "aiResponse": "Your natural response to the user",
          "overallScore": number (0-100),
          "metrics": {{
        {metrics}
          }},
          "feedback": string,
          "improvements": string[],
          "alternativeResponses": string[]
        }}
    "#}
}

fn analysis(kind: AnalysisKind, expected_text: &str, transcript: &str, metrics: &str) -> String {
    let (expected_label, spoken_label, coach, task, focus) = match kind {
        AnalysisKind::Pronunciation => (
            "Expected text",
            "User's spoken text",
            "pronunciation coach",
            "Analyze the user's pronunciation by comparing their spoken text with the expected text.",
            &[
                "Accuracy of pronunciation",
                "Specific sounds or words that were mispronounced",
                "Overall clarity",
            ][..],
        ),
        AnalysisKind::Intonation => (
            "Expected text",
            "User's spoken text",
            "speech coach",
            "Analyze the user's intonation and rhythm by comparing their spoken text with the expected text.",
            &["Intonation patterns", "Rhythm and stress", "Natural flow of speech"][..],
        ),
        AnalysisKind::Fluency => (
            "Expected prompt",
            "User's spoken response",
            "fluency coach",
            "Analyze the user's fluency in responding to the prompt.",
            &[
                "Speaking pace",
                "Hesitations and filler words",
                "Sentence structure and complexity",
                "Vocabulary usage",
            ][..],
        ),
        AnalysisKind::General => (
            "Expected text",
            "User's spoken text",
            "speech coach",
            "Analyze the user's speech by comparing their spoken text with the expected text.",
            &["Accuracy of pronunciation", "Clarity of speech", "Overall delivery"][..],
        ),
    };
    let focus = numbered(focus.iter().copied());

    formatdoc! {r#"
        {expected_label}: "{expected_text}"
        {spoken_label}: "{transcript}"

        You are an expert {coach}. {task}

        Provide detailed feedback on:
        {focus}
        Format the response as a JSON object with the following structure:
        {{
          "transcribedText": "The user's transcribed text",
          "overallScore": number (0-100),
          "metrics": {{
        {metrics}
          }},
          "feedback": string,
          "improvements": string[]
        }}
    "#}
}

/// "Previous exchanges:" block, or nothing when there is no history
fn history(exchanges: &[String]) -> String {
    if exchanges.is_empty() {
        return String::new();
    }

    format!("Previous exchanges:\n{}\n", numbered(exchanges.iter().map(String::as_str)))
}

/// One `n. item` line per item, each newline-terminated
fn numbered<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .enumerate()
        .map(|(i, item)| format!("{}. {item}\n", i + 1))
        .collect()
}

/// The `metrics` members of the schema, one line per key
fn metrics_schema(keys: &[&str]) -> String {
    keys.iter()
        .map(|key| format!(r#"    "{key}": {{ "score": number, "details": string }}"#))
        .collect::<Vec<_>>()
        .join(",\n")
}
