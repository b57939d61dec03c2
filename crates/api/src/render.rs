//! HTML pages for the ticket registry.
//!
//! Every page is a pure function of its input. Values coming from users or
//! the database pass through [`escape`] before they are interpolated.

use std::fmt::Write;

use axum::response::Html;
use qrtickets_db::models::ticket::{Ticket, TicketSummary};

/// Link target for a ticket's detail page.
pub fn ticket_path(ticket: &str) -> String {
    format!("/{}", urlencoding::encode(ticket))
}

/// Link target for a ticket's thumbnail.
pub fn ticket_image_path(ticket: &str) -> String {
    format!("/{}/image", urlencoding::encode(ticket))
}

/// GET / -- all registered tickets in insertion order.
pub fn list_page(tickets: &[TicketSummary]) -> Html<String> {
    let mut body = String::from("<h1>Tickets</h1>\n<p><a href=\"/new\">Register a ticket</a></p>\n");

    if tickets.is_empty() {
        body.push_str("<p class=\"empty\">No tickets registered yet.</p>\n");
    } else {
        body.push_str("<ul class=\"tickets\">\n");
        for ticket in tickets {
            let _ = writeln!(
                body,
                "<li class=\"ticket\"><a href=\"{href}\">{id}</a> <span class=\"qr\">{qr}</span>{photo}</li>",
                href = escape(&ticket_path(&ticket.ticket)),
                id = escape(&ticket.ticket),
                qr = escape(ticket.qr.as_deref().unwrap_or("")),
                photo = if ticket.has_photo {
                    format!(
                        " <img class=\"thumb\" src=\"{}\" alt=\"\" width=\"80\">",
                        escape(&ticket_image_path(&ticket.ticket))
                    )
                } else {
                    String::new()
                },
            );
        }
        body.push_str("</ul>\n");
    }

    layout("Tickets", &body)
}

/// GET /{ticket} -- one ticket with its QR payload and thumbnail.
pub fn detail_page(ticket: &Ticket) -> Html<String> {
    let id = escape(&ticket.ticket);
    let mut body = format!("<h1>Ticket {id}</h1>\n<dl>\n<dt>Ticket</dt><dd class=\"ticket\">{id}</dd>\n");

    match ticket.qr.as_deref() {
        Some(qr) => {
            let _ = writeln!(body, "<dt>QR</dt><dd class=\"qr\">{}</dd>", escape(qr));
        }
        None => body.push_str("<dt>QR</dt><dd class=\"qr missing\">none</dd>\n"),
    }

    if ticket.has_photo() {
        let _ = writeln!(
            body,
            "<dt>Photo</dt><dd><img class=\"photo\" src=\"{}\" alt=\"Photo for ticket {id}\" width=\"320\" height=\"240\"></dd>",
            escape(&ticket_image_path(&ticket.ticket)),
        );
    } else {
        body.push_str("<dt>Photo</dt><dd class=\"photo missing\">none</dd>\n");
    }

    body.push_str("</dl>\n<p><a href=\"/\">All tickets</a></p>\n");
    layout(&format!("Ticket {}", ticket.ticket), &body)
}

/// GET /new -- the upload form.
pub fn new_form_page() -> Html<String> {
    let body = "<h1>Register a ticket</h1>
<form method=\"post\" action=\"/new\" enctype=\"multipart/form-data\">
<p><label>Ticket number <input type=\"text\" name=\"ticket\" required></label></p>
<p><label>QR code scan <input type=\"file\" name=\"qr\" accept=\"image/*\"></label></p>
<p><label>Photo <input type=\"file\" name=\"image\" accept=\"image/*\"></label></p>
<p><button type=\"submit\">Register</button></p>
</form>
<p><a href=\"/\">All tickets</a></p>
";
    layout("Register a ticket", body)
}

/// Shown when a submission is rejected before anything is stored.
pub fn edit_page(message: &str) -> Html<String> {
    let body = format!(
        "<h1>Ticket not registered</h1>
<p class=\"error\">{}</p>
<p><a href=\"/new\">Try again</a> | <a href=\"/\">All tickets</a></p>
",
        escape(message)
    );
    layout("Ticket not registered", &body)
}

pub fn not_found_page(what: &str) -> Html<String> {
    let body = format!(
        "<h1>Not found</h1>\n<p class=\"error\">{} does not exist.</p>\n<p><a href=\"/\">All tickets</a></p>\n",
        escape(what)
    );
    layout("Not found", &body)
}

pub fn error_page() -> Html<String> {
    layout(
        "Error",
        "<h1>Something went wrong</h1>\n<p class=\"error\">An internal error occurred.</p>\n",
    )
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{}</title>
</head>
<body>
{body}</body>
</html>
",
        escape(title)
    ))
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
