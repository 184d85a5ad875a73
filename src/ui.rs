use crate::metrics::{JourneyState, StreakMetrics, Timeline};
use crate::milestones::{Milestone, UpcomingMilestone};
use html_escape::{encode_double_quoted_attribute, encode_text};

pub fn render_index(
    metrics: &StreakMetrics,
    badges: &[Milestone],
    next: Option<UpcomingMilestone>,
    timeline: &Timeline,
) -> String {
    let summary = match metrics.state {
        JourneyState::NotStarted => {
            "Set the date your journey began to start counting.".to_string()
        }
        JourneyState::Active => match metrics.current_streak_start_date.as_deref() {
            Some(start) => format!("Current streak since {}", encode_text(start)),
            None => String::new(),
        },
    };

    let next_text = match next {
        Some(next) => format!(
            "{} more day{} until {} days",
            next.days_remaining,
            plural(next.days_remaining),
            next.days
        ),
        None if metrics.days_sober > 0 => "Every milestone reached".to_string(),
        None => String::new(),
    };

    INDEX_HTML
        .replace("{{SUMMARY}}", &summary)
        .replace("{{DAYS_SOBER}}", &metrics.days_sober.to_string())
        .replace("{{JOURNEY_DAYS}}", &metrics.journey_days.to_string())
        .replace("{{LONGEST}}", &timeline.longest_completed_streak.to_string())
        .replace("{{NEXT}}", &next_text)
        .replace("{{BADGES}}", &render_badges(badges))
        .replace(
            "{{START_VALUE}}",
            &encode_double_quoted_attribute(metrics.journey_start_date.as_deref().unwrap_or_default()),
        )
        .replace(
            "{{TIMEZONE}}",
            &encode_double_quoted_attribute(&metrics.timezone),
        )
        .replace("{{TIMELINE}}", &render_timeline(timeline))
}

fn render_badges(badges: &[Milestone]) -> String {
    if badges.is_empty() {
        return r#"<p class="muted">No milestones yet.</p>"#.to_string();
    }

    badges
        .iter()
        .map(|badge| {
            format!(
                r#"<li class="badge"><strong>{}</strong><span>{}</span></li>"#,
                encode_text(&badge.label),
                encode_text(&badge.reached_on)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_timeline(timeline: &Timeline) -> String {
    if timeline.entries.is_empty() {
        return r#"<p class="muted">No slip-ups recorded.</p>"#.to_string();
    }

    timeline
        .entries
        .iter()
        .rev()
        .map(|entry| {
            let note = entry
                .slip_up
                .note
                .as_deref()
                .map(|note| format!(r#"<p class="note">{}</p>"#, encode_text(note)))
                .unwrap_or_default();
            format!(
                r#"<li><div><strong>{}</strong> slip-up, restarted {}</div><div class="muted">ended a {} day streak</div>{}</li>"#,
                encode_text(&entry.slip_up.slip_up_date),
                encode_text(&entry.slip_up.recovery_restart_date),
                entry.streak_days,
                note
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Recovery Journey</title>
  <style>
    :root {
      --bg: #eef4f1;
      --ink: #1f2d2a;
      --accent: #2f7d68;
      --muted: #62706c;
      --card: #ffffff;
      --shadow: 0 18px 48px rgba(31, 45, 42, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #fdfbf5);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(820px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: Georgia, serif;
      margin: 0;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--bg);
      border-radius: 16px;
      padding: 18px;
    }

    .stat .value {
      font-size: 2.4rem;
      font-weight: 600;
      color: var(--accent);
    }

    .muted {
      color: var(--muted);
    }

    ul {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      gap: 10px;
    }

    .badge {
      display: flex;
      justify-content: space-between;
      background: var(--bg);
      border-radius: 12px;
      padding: 10px 14px;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
    }

    input,
    button {
      font: inherit;
      padding: 8px 12px;
      border-radius: 10px;
      border: 1px solid #c9d6d1;
    }

    button {
      background: var(--accent);
      color: white;
      border: none;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Recovery Journey</h1>
      <p class="muted">{{SUMMARY}}</p>
    </header>

    <section class="stats">
      <div class="stat"><div class="value">{{DAYS_SOBER}}</div><div>days sober</div></div>
      <div class="stat"><div class="value">{{JOURNEY_DAYS}}</div><div>days on the journey</div></div>
      <div class="stat"><div class="value">{{LONGEST}}</div><div>longest past streak</div></div>
    </section>

    <section>
      <h2>Milestones</h2>
      <p class="muted">{{NEXT}}</p>
      <ul>
{{BADGES}}
      </ul>
    </section>

    <section>
      <h2>Timeline</h2>
      <ul>
{{TIMELINE}}
      </ul>
    </section>

    <section>
      <h2>Journey</h2>
      <form method="post" action="/profile">
        <label>Start date <input type="date" name="journey_start_date" value="{{START_VALUE}}" /></label>
        <label>Timezone <input type="text" name="timezone" value="{{TIMEZONE}}" /></label>
        <button type="submit">Save</button>
      </form>
    </section>

    <section>
      <h2>Record a slip-up</h2>
      <form method="post" action="/slip-up">
        <label>Slip-up date <input type="date" name="slip_up_date" required /></label>
        <label>Restarted on <input type="date" name="recovery_restart_date" /></label>
        <label>Note <input type="text" name="note" /></label>
        <button type="submit">Record</button>
      </form>
    </section>
  </main>
</body>
</html>
"#;
