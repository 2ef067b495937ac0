use cucumber::{given, then, when};
use screenshot_analyzer::domain::sample::sample_answer;
use speculoos::prelude::*;

use crate::state::TestWorld;

#[given(regex = r#"the vision service answers "([^"]*)""#)]
async fn vision_answers(world: &mut TestWorld, answer: String) {
    world.app.vision_responds_with(&answer).await;
}

#[when(regex = r#"the user asks "([^"]*)" about "([^"]*)""#)]
async fn asks(world: &mut TestWorld, question: String, extracted_text: String) {
    world.resp = Some(world.app.post_chat(&question, &extracted_text).await);
}

#[then(regex = r#"the answer is "([^"]*)""#)]
fn answer_is(world: &mut TestWorld, answer: String) {
    assert_that(&world.resp().body["response"].as_str()).is_equal_to(Some(answer.as_str()));
}

#[then(regex = r#"the answer is the sample answer to "([^"]*)""#)]
fn answer_is_sample(world: &mut TestWorld, question: String) {
    assert_that(&world.resp().body["response"].as_str())
        .is_equal_to(Some(sample_answer(&question)));
}
