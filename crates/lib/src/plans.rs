//! # Training Plans
//!
//! Generates a 4-week training plan from a player profile and keeps every
//! generated plan. The current plan is simply the most recent one.

use crate::constants::{HANDICAP_MAX, PLAN_TEXT_MAX_CHARS, PLAN_TEXT_MIN_CHARS, YEARS_PLAYED_MAX};
use crate::errors::CoachError;
use crate::prompts::PromptTask;
use crate::providers::ai::AiProvider;
use crate::providers::db::storage::PlanStore;
use crate::types::{new_id, timestamp_now, PlanInput, TrainingPlan};
use tracing::{debug, info};

fn validate_text(field: &'static str, value: &str) -> Result<(), CoachError> {
    let chars = value.chars().count();
    if !(PLAN_TEXT_MIN_CHARS..=PLAN_TEXT_MAX_CHARS).contains(&chars) {
        return Err(CoachError::invalid(
            field,
            format!(
                "must be between {PLAN_TEXT_MIN_CHARS} and {PLAN_TEXT_MAX_CHARS} characters, got {chars}"
            ),
        ));
    }
    Ok(())
}

/// Checks every field of a plan request. Bounds are inclusive.
pub fn validate_plan_input(input: &PlanInput) -> Result<(), CoachError> {
    if !(0..=YEARS_PLAYED_MAX).contains(&input.years_played) {
        return Err(CoachError::invalid(
            "years_played",
            format!("must be between 0 and {YEARS_PLAYED_MAX}"),
        ));
    }
    if !input.handicap.is_finite() || !(0.0..=HANDICAP_MAX).contains(&input.handicap) {
        return Err(CoachError::invalid(
            "handicap",
            format!("must be a number between 0 and {HANDICAP_MAX}"),
        ));
    }
    validate_text("strengths", &input.strengths)?;
    validate_text("weaknesses", &input.weaknesses)?;
    validate_text("goals", &input.goals)?;
    Ok(())
}

/// Validates the profile, asks the AI for a plan and stores it with its inputs.
pub async fn generate_plan(
    store: &dyn PlanStore,
    ai: &dyn AiProvider,
    task: &PromptTask,
    input: PlanInput,
    user_id: Option<&str>,
) -> Result<TrainingPlan, CoachError> {
    validate_plan_input(&input)?;

    let years_played = input.years_played.to_string();
    let handicap = input.handicap.to_string();
    let user_prompt = task.render_user_prompt(&[
        ("years_played", &years_played),
        ("handicap", &handicap),
        ("strengths", &input.strengths),
        ("weaknesses", &input.weaknesses),
        ("goals", &input.goals),
    ]);
    debug!(user_prompt = %user_prompt, "Requesting training plan");

    let plan_text = ai
        .complete(&task.system_prompt, &user_prompt, &task.options)
        .await?;

    let plan = TrainingPlan {
        id: new_id(),
        plan: plan_text,
        years_played: input.years_played,
        handicap: input.handicap,
        strengths: input.strengths,
        weaknesses: input.weaknesses,
        goals: input.goals,
        created_at: timestamp_now(),
        user_id: user_id.map(str::to_string),
    };
    store.insert_training_plan(&plan).await?;
    info!(plan_id = %plan.id, "Stored training plan");

    Ok(plan)
}

/// The most recently generated plan, if any.
pub async fn current_plan(store: &dyn PlanStore) -> Result<Option<TrainingPlan>, CoachError> {
    Ok(store.latest_training_plan().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PlanInput {
        PlanInput {
            years_played: 5,
            handicap: 18.5,
            strengths: "putting".to_string(),
            weaknesses: "driver slice".to_string(),
            goals: "break 90".to_string(),
        }
    }

    fn rejected_field(input: &PlanInput) -> Option<&'static str> {
        match validate_plan_input(input) {
            Err(CoachError::InvalidInput { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut low = input();
        low.years_played = 0;
        low.handicap = 0.0;
        low.strengths = "abc".to_string();
        assert!(validate_plan_input(&low).is_ok());

        let mut high = input();
        high.years_played = 80;
        high.handicap = 54.0;
        high.goals = "g".repeat(500);
        assert!(validate_plan_input(&high).is_ok());
    }

    #[test]
    fn test_out_of_range_fields_are_named() {
        let mut i = input();
        i.years_played = 81;
        assert_eq!(rejected_field(&i), Some("years_played"));

        let mut i = input();
        i.years_played = -1;
        assert_eq!(rejected_field(&i), Some("years_played"));

        let mut i = input();
        i.handicap = 54.1;
        assert_eq!(rejected_field(&i), Some("handicap"));

        let mut i = input();
        i.handicap = f64::NAN;
        assert_eq!(rejected_field(&i), Some("handicap"));

        let mut i = input();
        i.handicap = f64::INFINITY;
        assert_eq!(rejected_field(&i), Some("handicap"));

        let mut i = input();
        i.weaknesses = "ab".to_string();
        assert_eq!(rejected_field(&i), Some("weaknesses"));

        let mut i = input();
        i.goals = "g".repeat(501);
        assert_eq!(rejected_field(&i), Some("goals"));
    }
}
