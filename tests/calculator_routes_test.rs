mod common;

use axum::http::StatusCode;
use common::{get, post_form, test_app};

#[tokio::test]
async fn calculator_forms_render_for_anonymous_visitors() {
    let (_dir, app) = test_app().await;
    for uri in ["/", "/login", "/register", "/trigo", "/logln", "/hcflcm", "/qe", "/stats"] {
        let resp = get(&app, uri, None).await;
        assert_eq!(resp.status, StatusCode::OK, "{uri}");
        assert!(resp.body.contains("Log In"), "{uri}");
    }
}

#[tokio::test]
async fn calculator_pages_show_the_logged_in_user() {
    let (_dir, app) = test_app().await;
    let resp = post_form(
        &app,
        "/register",
        "username=ada&email=&password=pw&confirmation=pw",
        None,
    )
    .await;
    let cookie = resp.session_cookie().expect("registration sets a session");

    let resp = post_form(&app, "/hcflcm", "fn=lcm&x=4,6", Some(&cookie)).await;
    assert!(resp.body.contains("<output>12</output>"));
    assert!(resp.body.contains("Logged in as <strong>ada</strong>"));
}

#[tokio::test]
async fn trigonometry() {
    let (_dir, app) = test_app().await;

    let resp = post_form(&app, "/trigo", "fn=sin&x=30&unit=degree", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<output>0.5</output>"));

    let resp = post_form(&app, "/trigo", "fn=cosec&x=0&unit=radian", None).await;
    assert!(resp.body.contains("<output>∞</output>"));

    let resp = post_form(&app, "/trigo", "fn=sin&x=abc&unit=degree", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("x must be a number"));
}

#[tokio::test]
async fn logarithms() {
    let (_dir, app) = test_app().await;

    let resp = post_form(&app, "/logln", "fn=log&x=100&base=10", None).await;
    assert!(resp.body.contains("<output>2.0</output>"));

    let resp = post_form(&app, "/logln", "fn=ln&x=0&base=10", None).await;
    assert!(resp.body.contains("value must be positive"));

    let resp = post_form(&app, "/logln", "fn=log&x=5&base=1", None).await;
    assert!(resp.body.contains("base must be positive and not 1"));

    // ln does not need a base at all
    let resp = post_form(&app, "/logln", "fn=ln&x=1", None).await;
    assert!(resp.body.contains("<output>0.0</output>"));
}

#[tokio::test]
async fn hcf_and_lcm() {
    let (_dir, app) = test_app().await;

    let resp = post_form(&app, "/hcflcm", "fn=gcd&x=12,18,24", None).await;
    assert!(resp.body.contains("<output>6</output>"));

    let resp = post_form(&app, "/hcflcm", "fn=lcm&x=1,1,1", None).await;
    assert!(resp.body.contains("<output>1</output>"));

    let resp = post_form(&app, "/hcflcm", "fn=gcd&x=4,0,6", None).await;
    assert!(resp.body.contains("all numbers must be positive"));
    assert!(!resp.body.contains("<output>"));
}

#[tokio::test]
async fn quadratic_equations() {
    let (_dir, app) = test_app().await;

    let resp = post_form(&app, "/qe", "a=1&b=0&c=-4", None).await;
    assert!(resp.body.contains(r#"<output id="x1">2.0</output>"#));
    assert!(resp.body.contains(r#"<output id="x2">-2.0</output>"#));
    assert!(!resp.body.contains("no real root"));

    let resp = post_form(&app, "/qe", "a=1&b=0&c=4", None).await;
    assert!(resp.body.contains("Both roots are complex."));

    let resp = post_form(&app, "/qe", "a=0&b=2&c=1", None).await;
    assert!(resp.body.contains("a must be greater than 0"));
}

#[tokio::test]
async fn statistics() {
    let (_dir, app) = test_app().await;

    let resp = post_form(&app, "/stats", "x=1,2,3,4", None).await;
    assert!(resp.body.contains(r#"<td id="mean">2.5</td>"#));
    assert!(resp.body.contains(r#"<td id="median">2.5</td>"#));
    assert!(resp.body.contains(r#"<td id="range">3</td>"#));
    assert!(resp.body.contains(r#"<td id="sd">1.118</td>"#));

    let resp = post_form(&app, "/stats", "x=5,5,5", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("standard deviation is zero"));
}

#[tokio::test]
async fn extreme_inputs_render_instead_of_failing() {
    let (_dir, app) = test_app().await;

    let resp = post_form(&app, "/trigo", "fn=sin&x=1e308&unit=degree", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("x is too large to convert to radians"));

    let resp = post_form(
        &app,
        "/qe",
        "a=9223372036854775807&b=0&c=-9223372036854775808",
        None,
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<output id="x1">"#));
    assert!(!resp.body.contains("Both roots are complex."));

    let resp = post_form(
        &app,
        "/stats",
        "x=-9223372036854775808,9223372036854775807",
        None,
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<td id="range">18446744073709551615</td>"#));

    let resp = post_form(&app, "/hcflcm", "fn=gcd&x=12,-18", None).await;
    assert!(resp.body.contains("all numbers must be positive"));
}
