use cucumber::{given, then, when};
use speculoos::prelude::*;

use crate::state::{self, TestWorld};

// Steps are defined with `given`, `when` and `then` attributes.
#[given("the server runs without vision credentials")]
async fn without_vision(world: &mut TestWorld) {
    // Dropping the previous app aborts its server.
    world.app = state::spawn_app(false).await;
}

#[when("the user requests a health check")]
async fn health_check(world: &mut TestWorld) {
    world.resp = Some(world.app.get("/api/health").await);
}

#[when(regex = r#"the user requests "(\S+)""#)]
async fn get_route(world: &mut TestWorld, route: String) {
    world.resp = Some(world.app.get(&route).await);
}

#[then(regex = r#"the extraction engine is "(\S+)""#)]
fn engine_is(world: &mut TestWorld, engine: String) {
    assert_that(&world.resp().body["engine"].as_str()).is_equal_to(Some(engine.as_str()));
}

#[then("the OCR engine is reported unavailable")]
fn ocr_unavailable(world: &mut TestWorld) {
    let ocr = &world.resp().body["ocr"];
    assert_that(&ocr["status"].as_str()).is_equal_to(Some("unavailable"));
    assert_that(&ocr["reason"].as_str()).is_some();
}
