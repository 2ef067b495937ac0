use cucumber::{then, when};
use speculoos::prelude::*;

use crate::state::TestWorld;

#[when(regex = r#"a browser on "(\S+)" checks if it may post to "(\S+)""#)]
async fn preflight(world: &mut TestWorld, origin: String, route: String) {
    world.resp = Some(world.app.preflight(&origin, &route).await);
}

#[then("the response allows any origin")]
fn allows_any_origin(world: &mut TestWorld) {
    let origin = world
        .resp()
        .headers
        .get("access-control-allow-origin")
        .and_then(|value| value.to_str().ok());
    assert_that(&origin).is_equal_to(Some("*"));
}
