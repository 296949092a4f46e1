//! Inline HTML rendering
//!
//! Compass renders a handful of small pages; they are built as strings here
//! so the handlers stay free of markup. All record values pass through
//! [`escape`] on the way out.

use compass_core::Company;
use std::fmt::Write;

/// Escape a value for interpolation into HTML text or attributes
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

fn layout(title: &str, demo_mode: bool, body: &str) -> String {
    let banner = if demo_mode {
        "<p class='banner'>Demo mode: data lives in your session and resets when it ends.</p>"
    } else {
        ""
    };
    format!(
        "<!DOCTYPE html>\
         <html><head><meta charset='utf-8'><title>{title} - Compass</title>\
         <style>\
         body {{ font-family: sans-serif; margin: 40px auto; max-width: 720px; }}\
         table {{ border-collapse: collapse; width: 100%; }}\
         th, td {{ border: 1px solid #ccc; padding: 8px; text-align: left; }}\
         .banner {{ background: #fff3cd; padding: 8px; }}\
         nav a {{ margin-right: 12px; }}\
         </style></head>\
         <body><nav><a href='/'>Companies</a><a href='/add'>Add</a>\
         <a href='/about'>About</a><a href='/contact'>Contact</a></nav>\
         {banner}<h1>{title}</h1>{body}</body></html>",
        title = escape(title),
    )
}

/// The company listing page
#[must_use]
pub fn listing(companies: &[Company], demo_mode: bool) -> String {
    let mut rows = String::new();
    for company in companies {
        let id = company.id.unwrap_or_default();
        let _ = write!(
            rows,
            "<tr><td>{id}</td><td>{name}</td><td>{location}</td>\
             <td><a href='/edit/{id}'>Edit</a> <a href='/delete/{id}'>Delete</a></td></tr>",
            name = escape(company.name()),
            location = escape(company.location().unwrap_or("")),
        );
    }
    let body = format!(
        "<table><tr><th>Id</th><th>Name</th><th>Location</th><th></th></tr>{rows}</table>"
    );
    layout("Companies", demo_mode, &body)
}

/// The add/edit form page; `company` is `None` for a blank add form
#[must_use]
pub fn company_form(company: Option<&Company>, error: Option<&str>, demo_mode: bool) -> String {
    let (title, id_field, name, location) = match company {
        Some(c) => (
            if c.id.is_some() { "Edit Company" } else { "Add Company" },
            c.id.map(|id| format!("<input type='hidden' name='id' value='{id}'>"))
                .unwrap_or_default(),
            escape(c.name()),
            escape(c.location().unwrap_or("")),
        ),
        None => ("Add Company", String::new(), String::new(), String::new()),
    };
    let notice = error
        .map(|msg| format!("<p class='banner'>{}</p>", escape(msg)))
        .unwrap_or_default();
    let body = format!(
        "{notice}<form method='post' action='/save'>{id_field}\
         <p><label>Name <input name='name' value='{name}' maxlength='50'></label></p>\
         <p><label>Location <input name='location' value='{location}' maxlength='50'></label></p>\
         <p><button type='submit'>Save</button></p></form>",
    );
    layout(title, demo_mode, &body)
}

/// Static "About" page
#[must_use]
pub fn about(demo_mode: bool) -> String {
    layout(
        "About",
        demo_mode,
        "<p>Compass is a small directory of companies with add, edit and \
         delete, rendered entirely on the server.</p>",
    )
}

/// Static "Contact" page
#[must_use]
pub fn contact(demo_mode: bool) -> String {
    layout(
        "Contact",
        demo_mode,
        "<p>Questions about this deployment? Reach the operators at \
         ops@compass.example.</p>",
    )
}

/// The fixed capacity-exceeded page served with status 503.
///
/// Self-contained on purpose: it must render without a session, without
/// routing, and without any other page machinery.
#[must_use]
pub fn server_busy() -> String {
    "<html><body style='font-family: sans-serif; text-align: center; padding-top: 50px;'>\
     <h1 style='color: #e74c3c;'>Server Busy</h1>\
     <p>This demo is currently at full capacity.</p>\
     <p>Please wait a few minutes for a slot to open up.</p>\
     <button onclick='location.reload()' style='padding: 10px 20px; cursor: pointer;'>Try Again</button>\
     </body></html>"
        .to_string()
}

/// Error page for a missing record
#[must_use]
pub fn not_found(id: i64, demo_mode: bool) -> String {
    layout(
        "Not Found",
        demo_mode,
        &format!("<p>No company with id {id}.</p><p><a href='/'>Back to the list</a></p>"),
    )
}

/// Error page for everything else
#[must_use]
pub fn internal_error(demo_mode: bool) -> String {
    layout(
        "Something went wrong",
        demo_mode,
        "<p>The operation could not be completed. <a href='/'>Back to the list</a></p>",
    )
}
