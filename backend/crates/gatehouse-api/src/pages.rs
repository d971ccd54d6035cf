//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape`].

use std::fmt::Write;

use gatehouse_auth::{Flash, FlashLevel};
use gatehouse_commons::User;
use gatehouse_core::QuestionBank;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:44rem;margin:2rem auto;padding:0 1rem;color:#222}\
header{display:flex;justify-content:space-between;align-items:center;border-bottom:1px solid #ddd;margin-bottom:1.5rem}\
header form{display:inline}\
.flash{padding:.6rem .9rem;border-radius:4px;margin-bottom:1rem}\
.flash.info{background:#e8f0fe}.flash.success{background:#e6f4ea}.flash.error{background:#fce8e6}\
label{display:block;margin:.6rem 0 .2rem}\
input[type=text],input[type=password]{width:100%;padding:.4rem}\
fieldset{margin-bottom:1rem;border:1px solid #ddd}\
table{width:100%;border-collapse:collapse}td,th{padding:.4rem;border-bottom:1px solid #eee;text-align:left}\
button{padding:.4rem .9rem;margin-top:.6rem}";

/// Escape text for HTML element and attribute content.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn flash_html(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => {
            let class = match flash.level {
                FlashLevel::Info => "info",
                FlashLevel::Success => "success",
                FlashLevel::Error => "error",
            };
            format!(
                r#"<div class="flash {}" role="status">{}</div>"#,
                class,
                escape(&flash.message)
            )
        },
        None => String::new(),
    }
}

fn layout(title: &str, user: Option<&User>, flash: Option<&Flash>, body: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<span>Signed in as <strong>{}</strong></span>
<form method="post" action="/logout"><button type="submit">Log out</button></form>"#,
            escape(user.username.as_str())
        ),
        None => r#"<span><a href="/login">Log in</a> | <a href="/register">Register</a></span>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Gatehouse</title>
<style>{style}</style>
</head>
<body>
<header><h1><a href="/">Gatehouse</a></h1>{nav}</header>
<main>
{flash}
<h2>{title}</h2>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        nav = nav,
        flash = flash_html(flash),
        body = body,
    )
}

pub fn landing(flash: Option<&Flash>) -> String {
    layout(
        "Welcome",
        None,
        flash,
        r#"<p>Gatehouse admits members in three steps: pass a short evaluation,
get approved by an administrator, then activate your membership.</p>
<p><a href="/register">Create an account</a> or <a href="/login">log in</a> to continue.</p>"#,
    )
}

pub fn register_form(flash: Option<&Flash>) -> String {
    layout(
        "Register",
        None,
        flash,
        r#"<form method="post" action="/register">
<label for="username">Username</label>
<input type="text" id="username" name="username" required minlength="3" maxlength="32" autocomplete="username">
<label for="password">Password</label>
<input type="password" id="password" name="password" required minlength="8" maxlength="72" autocomplete="new-password">
<label for="confirm_password">Confirm password</label>
<input type="password" id="confirm_password" name="confirm_password" required autocomplete="new-password">
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a>.</p>"#,
    )
}

pub fn login_form(flash: Option<&Flash>) -> String {
    layout(
        "Log in",
        None,
        flash,
        r#"<form method="post" action="/login">
<label for="username">Username</label>
<input type="text" id="username" name="username" required autocomplete="username">
<label for="password">Password</label>
<input type="password" id="password" name="password" required autocomplete="current-password">
<button type="submit">Log in</button>
</form>
<p>New here? <a href="/register">Create an account</a>.</p>"#,
    )
}

pub fn evaluation(
    user: &User,
    bank: &QuestionBank,
    pass_mark: u8,
    flash: Option<&Flash>,
) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<p>Answer the questions below. You need at least {}% to move on to review.</p>",
        pass_mark
    );
    if user.evaluation_attempts > 0 {
        let _ = write!(
            body,
            "<p>Previous attempts: {}. Last score: {}%.</p>",
            user.evaluation_attempts, user.evaluation_score
        );
    }

    body.push_str(r#"<form method="post" action="/evaluation">"#);
    for (index, question) in bank.questions().iter().enumerate() {
        let _ = write!(
            body,
            "<fieldset><legend>{}. {}</legend>",
            index + 1,
            escape(&question.prompt)
        );
        for (choice_index, choice) in question.choices.iter().enumerate() {
            let _ = write!(
                body,
                r#"<label><input type="radio" name="{id}" id="{id}-{n}" value="{value}"> {value}</label>"#,
                id = escape(&question.id),
                n = choice_index,
                value = escape(choice),
            );
        }
        body.push_str("</fieldset>");
    }
    body.push_str(r#"<button type="submit">Submit answers</button></form>"#);

    layout("Evaluation", Some(user), flash, &body)
}

pub fn pending(user: &User, flash: Option<&Flash>) -> String {
    let body = format!(
        "<p>You passed the evaluation with {}%. An administrator will review your \
         application shortly. Check back later.</p>",
        user.evaluation_score
    );
    layout("Awaiting approval", Some(user), flash, &body)
}

pub fn rejected(user: &User, flash: Option<&Flash>) -> String {
    layout(
        "Application declined",
        Some(user),
        flash,
        "<p>An administrator has reviewed your application and declined it. \
         This decision is final.</p>",
    )
}

pub fn admin_approvals(admin: &User, pending: &[User], flash: Option<&Flash>) -> String {
    let mut body = String::new();

    if pending.is_empty() {
        body.push_str("<p>No applications are waiting for review.</p>");
    } else {
        body.push_str(
            "<table><thead><tr><th>Username</th><th>Score</th><th>Attempts</th>\
             <th>Registered</th><th>Decision</th></tr></thead><tbody>",
        );
        for user in pending {
            let name = escape(user.username.as_str());
            let _ = write!(
                body,
                r#"<tr><td>{name}</td><td>{score}%</td><td>{attempts}</td><td>{registered}</td><td>
<form method="post" action="/admin/approvals">
<input type="hidden" name="username" value="{name}">
<button type="submit" name="action" value="approve">Approve</button>
<button type="submit" name="action" value="reject">Reject</button>
</form></td></tr>"#,
                name = name,
                score = user.evaluation_score,
                attempts = user.evaluation_attempts,
                registered = format_timestamp(user.created_at),
            );
        }
        body.push_str("</tbody></table>");
    }

    layout("Pending approvals", Some(admin), flash, &body)
}

pub fn payment(user: &User, flash: Option<&Flash>) -> String {
    layout(
        "Activate membership",
        Some(user),
        flash,
        r#"<p>Your application has been approved. Complete payment to unlock the dashboard.</p>
<p>No card is charged; this step records the payment directly.</p>
<form method="post" action="/payment"><button type="submit">Pay now</button></form>"#,
    )
}

pub fn dashboard(user: &User, flash: Option<&Flash>) -> String {
    let body = format!(
        "<p>Welcome, {}. Your membership is active.</p>\
         <ul><li>Evaluation score: {}%</li><li>Member since: {}</li></ul>",
        escape(user.username.as_str()),
        user.evaluation_score,
        format_timestamp(user.created_at),
    );
    layout("Dashboard", Some(user), flash, &body)
}

pub fn server_error() -> String {
    layout(
        "Something went wrong",
        None,
        None,
        r#"<p>The server could not complete your request. Please try again later.</p>
<p><a href="/">Back to the start page</a></p>"#,
    )
}

fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}
