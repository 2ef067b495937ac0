use cucumber::then;
use reqwest::StatusCode;
use speculoos::prelude::*;

use crate::state::TestWorld;

#[then("the response is 200 OK")]
fn response_is_ok(world: &mut TestWorld) {
    assert_that(&world.resp().status).is_equal_to(StatusCode::OK);
}

#[then("the response is 400 Bad Request")]
fn response_is_bad_request(world: &mut TestWorld) {
    assert_that(&world.resp().status).is_equal_to(StatusCode::BAD_REQUEST);
}

#[then("the response is 404 Not Found")]
fn response_is_not_found(world: &mut TestWorld) {
    assert_that(&world.resp().status).is_equal_to(StatusCode::NOT_FOUND);
}

#[then("the response is 500 Internal Server Error")]
fn response_is_internal_server_error(world: &mut TestWorld) {
    assert_that(&world.resp().status).is_equal_to(StatusCode::INTERNAL_SERVER_ERROR);
}

#[then(regex = r#"the failure code is "(\S+)""#)]
fn failure_code_is(world: &mut TestWorld, code: String) {
    let body = &world.resp().body;
    assert_that(&body["status"].as_str()).is_equal_to(Some("fail"));
    assert_that(&body["code"].as_str()).is_equal_to(Some(code.as_str()));
}
