use axum::response::Html;

use super::layout;

pub fn login_page(flashes: &[String]) -> Html<String> {
    let body = r#"<h1>Log in</h1>
<form method="post" action="/login">
<input type="text" name="username" placeholder="Username" required>
<input type="password" name="password" placeholder="Password" required>
<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/signup">Sign up</a></p>"#;
    layout("Log in", None, flashes, body)
}

pub fn signup_page(flashes: &[String]) -> Html<String> {
    let body = r#"<h1>Sign up</h1>
<form method="post" action="/signup">
<input type="email" name="email" placeholder="Email" required>
<input type="text" name="username" placeholder="Username" required>
<input type="password" name="password" placeholder="Password" required>
<input type="password" name="password2" placeholder="Repeat password" required>
<button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#;
    layout("Sign up", None, flashes, body)
}
