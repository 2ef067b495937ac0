use cucumber::{given, then, when};
use screenshot_analyzer::domain::sample::SAMPLE_EXTRACTED_TEXT;
use speculoos::prelude::*;

use crate::state::{TestWorld, SCREENSHOT};

#[given(regex = r#"the vision service reads "([^"]*)""#)]
async fn vision_reads(world: &mut TestWorld, text: String) {
    world.app.vision_responds_with(&text).await;
}

#[given("the vision service is failing")]
async fn vision_fails(world: &mut TestWorld) {
    world.app.vision_fails().await;
}

#[when("the user uploads a screenshot")]
async fn upload_screenshot(world: &mut TestWorld) {
    world.resp = Some(world.app.post_extract_text(SCREENSHOT).await);
}

#[when(regex = r#"the user uploads "(\S+)" instead of a screenshot"#)]
async fn upload_other(world: &mut TestWorld, image_data_url: String) {
    world.resp = Some(world.app.post_extract_text(&image_data_url).await);
}

#[then(regex = r#"the extracted text is "([^"]*)""#)]
fn extracted_text_is(world: &mut TestWorld, text: String) {
    assert_that(&world.resp().body["text"].as_str()).is_equal_to(Some(text.as_str()));
}

#[then("the extracted text is the sample text")]
fn extracted_text_is_sample(world: &mut TestWorld) {
    assert_that(&world.resp().body["text"].as_str()).is_equal_to(Some(SAMPLE_EXTRACTED_TEXT));
}
