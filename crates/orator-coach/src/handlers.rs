use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::Result;
use crate::evaluation::EvaluationResult;
use crate::ingest::{SpeechInput, Submission};
use crate::state::CoachState;

/// Debate feedback on a spoken argument
pub async fn ai_feedback(State(state): State<CoachState>, submission: Submission) -> Result<Json<EvaluationResult>> {
    let coach = state.coach()?;
    let (audio, task) = submission.into_feedback()?;
    Ok(Json(coach.evaluate(audio, task).await?))
}

/// Rubric-based evaluation of a spoken story
pub async fn evaluate_story(
    State(state): State<CoachState>,
    submission: Submission,
) -> Result<Json<EvaluationResult>> {
    let coach = state.coach()?;
    let (audio, task) = submission.into_story()?;
    Ok(Json(coach.evaluate(audio, task).await?))
}

/// Role-play turn: evaluation plus the partner's reply
pub async fn simulate_conversation(
    State(state): State<CoachState>,
    submission: Submission,
) -> Result<Json<EvaluationResult>> {
    let coach = state.coach()?;
    let (audio, task) = submission.into_conversation()?;
    Ok(Json(coach.evaluate(audio, task).await?))
}

/// Pronunciation, intonation, fluency or general delivery analysis
pub async fn speech_analysis(
    State(state): State<CoachState>,
    submission: Submission,
) -> Result<Json<EvaluationResult>> {
    let coach = state.coach()?;
    let (audio, task) = submission.into_analysis()?;
    Ok(Json(coach.evaluate(audio, task).await?))
}

pub async fn text_to_speech(State(state): State<CoachState>, input: SpeechInput) -> Result<Response> {
    let coach = state.coach()?;
    let speech = coach.synthesize(input.text, input.voice).await?;

    tracing::debug!(voice = %input.voice, bytes = speech.audio.len(), "synthesized speech");

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg".to_owned()),
            (header::CONTENT_LENGTH, speech.audio.len().to_string()),
        ],
        speech.audio,
    )
        .into_response())
}
