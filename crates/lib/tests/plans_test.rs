//! # Training Plan Tests

use anyhow::Result;
use swingsense::{
    errors::{AiError, CoachError},
    plans::{current_plan, generate_plan},
    PlanInput, PromptTask,
};
use swingsense_test_utils::{MockAiProvider, MockReply, TestSetup};

const PLAN_KEY: &str = "You are a helpful golf coach.";

fn profile() -> PlanInput {
    PlanInput {
        years_played: 12,
        handicap: 14.2,
        strengths: "putting".to_string(),
        weaknesses: "long irons".to_string(),
        goals: "break 80".to_string(),
    }
}

#[tokio::test]
async fn test_generate_plan_formats_prompt_and_persists() -> Result<()> {
    // --- Arrange ---
    let setup = TestSetup::new().await?;
    let ai = MockAiProvider::new();
    ai.add_response(PLAN_KEY, "Week 1: long iron ladder drill.");
    let task = PromptTask::training_plan();

    // --- Act ---
    let plan = generate_plan(&setup.provider, &ai, &task, profile(), Some("user-1")).await?;

    // --- Assert ---
    assert_eq!(plan.plan, "Week 1: long iron ladder drill.");
    assert_eq!(plan.handicap, 14.2);
    assert_eq!(plan.user_id.as_deref(), Some("user-1"));

    let calls = ai.get_calls();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0].user_prompt;
    assert!(prompt.contains("- Years played: 12"));
    assert!(prompt.contains("- Handicap: 14.2"));
    assert!(prompt.contains("- Strengths: putting"));
    assert!(prompt.contains("- Weaknesses: long irons"));
    assert!(prompt.contains("- Goals: break 80"));

    assert_eq!(current_plan(&setup.provider).await?, Some(plan));
    Ok(())
}

#[tokio::test]
async fn test_current_plan_is_the_most_recent() -> Result<()> {
    // --- Arrange ---
    let setup = TestSetup::new().await?;
    let ai = MockAiProvider::new();
    ai.add_response(PLAN_KEY, "Some plan");
    let task = PromptTask::training_plan();
    assert!(current_plan(&setup.provider).await?.is_none());

    // --- Act ---
    let mut last = None;
    for goals in ["break 100", "break 90", "break 80"] {
        let input = PlanInput {
            goals: goals.to_string(),
            ..profile()
        };
        last = Some(generate_plan(&setup.provider, &ai, &task, input, None).await?);
    }

    // --- Assert ---
    let current = current_plan(&setup.provider).await?;
    assert_eq!(current, last);
    assert_eq!(current.map(|p| p.goals), Some("break 80".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_invalid_profile_makes_no_ai_call() -> Result<()> {
    // --- Arrange ---
    let setup = TestSetup::new().await?;
    let ai = MockAiProvider::new();
    ai.add_response(PLAN_KEY, "unused");
    let task = PromptTask::training_plan();
    let input = PlanInput {
        years_played: 81,
        ..profile()
    };

    // --- Act ---
    let err = generate_plan(&setup.provider, &ai, &task, input, None)
        .await
        .unwrap_err();

    // --- Assert ---
    assert!(matches!(
        err,
        CoachError::InvalidInput {
            field: "years_played",
            ..
        }
    ));
    assert!(ai.get_calls().is_empty());
    assert!(current_plan(&setup.provider).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ai_failure_persists_nothing() -> Result<()> {
    // --- Arrange ---
    let setup = TestSetup::new().await?;
    let ai = MockAiProvider::new();
    ai.add_reply(PLAN_KEY, MockReply::Malformed("no choices".to_string()));
    let task = PromptTask::training_plan();

    // --- Act ---
    let err = generate_plan(&setup.provider, &ai, &task, profile(), None)
        .await
        .unwrap_err();

    // --- Assert ---
    assert!(matches!(
        err,
        CoachError::Upstream(AiError::UpstreamMalformed(_))
    ));
    assert!(current_plan(&setup.provider).await?.is_none());
    Ok(())
}
