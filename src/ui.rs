use crate::models::{AddDrillView, Drill, HomeView};
use chrono::{NaiveDate, NaiveDateTime};
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub fn render_home(view: &HomeView) -> String {
    let selected = view.selected_date.date();
    let done = view
        .drills
        .iter()
        .filter(|drill| view.is_completed(&drill.id))
        .count();

    layout(
        view.title,
        html! {
            header {
                h1 { "Daily Drill" }
                p.subtitle {
                    time datetime=(iso_date(selected)) { (long_date(view.selected_date)) }
                }
            }
            nav.days {
                @for date in &view.date_range {
                    a.day.selected[*date == selected] href={ "/?date=" (iso_date(*date)) } {
                        span.weekday { (date.format("%a")) }
                        span.number { (date.format("%-d")) }
                    }
                }
            }
            section.drills {
                @if view.drills.is_empty() {
                    p.empty { "No drills yet for this day." }
                } @else {
                    p.progress { (done) " of " (view.drills.len()) " done" }
                    ul {
                        @for drill in &view.drills {
                            (drill_row(drill, selected, view.is_completed(&drill.id)))
                        }
                    }
                }
            }
            footer {
                a.button href="/add" { "Add a drill" }
            }
        },
    )
    .into_string()
}

pub fn render_add_drill(view: &AddDrillView) -> String {
    layout(
        view.title,
        html! {
            header {
                h1 { "Add a drill" }
                p.subtitle {
                    "Starting "
                    time datetime=(iso_date(view.selected_date.date())) { (long_date(view.selected_date)) }
                }
            }
            form.add method="post" action="/add" {
                label for="drill" { "Drill" }
                input id="drill" type="text" name="drill" placeholder="e.g. 20 pushups" autofocus;
                button.button type="submit" { "Save" }
            }
            footer {
                a href="/" { "Back" }
            }
        },
    )
    .into_string()
}

fn drill_row(drill: &Drill, selected: NaiveDate, completed: bool) -> Markup {
    html! {
        @if completed {
            li data-drill=(drill.id.as_str()) data-state="done" {
                span.tick { "✓" }
                span.name { (drill.name) }
            }
        } @else {
            li data-drill=(drill.id.as_str()) data-state="open" {
                form method="post" action="/complete" {
                    input type="hidden" name="date" value=(iso_date(selected));
                    input type="hidden" name="drillid" value=(drill.id.as_str());
                    button.check type="submit" title="Mark complete" { "○" }
                }
                span.name { (drill.name) }
            }
        }
    }
}

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                main.app { (content) }
            }
        }
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn long_date(date: NaiveDateTime) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

const CSS: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .days {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .day {
      display: grid;
      justify-items: center;
      padding: 10px 0;
      border-radius: 16px;
      background: white;
      color: var(--accent-2);
      text-decoration: none;
    }

    .day.selected {
      background: var(--accent-2);
      color: white;
    }

    .weekday {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
    }

    .number {
      font-size: 1.3rem;
      font-weight: 600;
    }

    .drills ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    .drills li {
      display: flex;
      align-items: center;
      gap: 14px;
      background: white;
      border-radius: 18px;
      padding: 14px 18px;
    }

    .drills li[data-state="done"] .name {
      color: #8b857d;
      text-decoration: line-through;
    }

    .drills form {
      margin: 0;
    }

    .check,
    .tick {
      width: 32px;
      height: 32px;
      border-radius: 999px;
      display: inline-grid;
      place-items: center;
      font-size: 1rem;
    }

    .check {
      border: 2px solid var(--accent-2);
      background: transparent;
      color: var(--accent-2);
      cursor: pointer;
    }

    .tick {
      background: var(--accent);
      color: white;
    }

    .progress,
    .empty {
      color: #5f5c57;
      margin: 0 0 12px;
    }

    form.add {
      display: grid;
      gap: 12px;
    }

    form.add input {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 14px;
      padding: 14px 16px;
      font: inherit;
    }

    .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font: inherit;
      font-weight: 600;
      background: var(--accent);
      color: white;
      text-decoration: none;
      text-align: center;
      cursor: pointer;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    footer a:not(.button) {
      color: var(--accent-2);
    }
"#;
