use crate::models::{PREDEFINED_ACTIONS, RATINGS};
use chrono::NaiveDate;

pub fn render_index(today: NaiveDate) -> String {
    let options = PREDEFINED_ACTIONS
        .iter()
        .map(|action| {
            let action = escape_html(action);
            format!(r#"<option value="{action}">{action}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n          ");

    let buttons = RATINGS
        .iter()
        .map(|rating| {
            let label = rating.label();
            format!(
                r#"<button class="rate-{}" type="submit" name="rating" value="{value}">{} {label} ({value})</button>"#,
                label.to_ascii_lowercase(),
                rating.emoji(),
                value = rating.value(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ");

    INDEX_HTML
        .replace("{{DATE}}", &today.to_string())
        .replace("{{ACTION_OPTIONS}}", &options)
        .replace("{{RATING_BUTTONS}}", &buttons)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Self Rating</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #24221f;
      --muted: #77716a;
      --card: #ffffff;
      --pos: #3c8d5a;
      --neu: #8a8478;
      --neg: #c4513b;
      --shadow: 0 18px 48px rgba(36, 34, 31, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 16px 48px;
    }

    main {
      width: min(760px, 100%);
      display: grid;
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    h1, h2, h3 {
      margin: 0;
    }

    .subtitle, .empty {
      margin: 0;
      color: var(--muted);
    }

    .picker {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 12px;
    }

    select, input[type="text"] {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid #d8d2c8;
    }

    .rating-buttons {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    .rating-buttons button {
      font: inherit;
      font-weight: 600;
      padding: 14px;
      border: none;
      border-radius: 14px;
      color: white;
      cursor: pointer;
    }

    .rate-negative { background: var(--neg); }
    .rate-neutral { background: var(--neu); }
    .rate-positive { background: var(--pos); }

    .undo-bar {
      display: none;
      align-items: center;
      justify-content: space-between;
      background: #2f2c28;
      color: white;
      padding: 10px 14px;
      border-radius: 12px;
    }

    .undo-bar.visible {
      display: flex;
    }

    .undo-bar button {
      font: inherit;
      background: transparent;
      color: #ffd27a;
      border: none;
      cursor: pointer;
    }

    ul.actions {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    ul.actions li {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
      padding: 10px 12px;
      border-radius: 12px;
      border-left: 4px solid var(--neu);
      background: #faf8f4;
    }

    ul.actions li.rating-1 { border-left-color: var(--pos); }
    ul.actions li.rating--1 { border-left-color: var(--neg); }

    .time {
      color: var(--muted);
      font-size: 0.85rem;
      margin-right: 8px;
    }

    .delete {
      background: none;
      border: none;
      color: var(--muted);
      font-size: 1rem;
      cursor: pointer;
    }

    .counts {
      display: flex;
      gap: 16px;
      flex-wrap: wrap;
    }

    .sum {
      font-family: "Courier New", monospace;
    }

    .day {
      border-top: 1px solid #ece7de;
      padding-top: 12px;
      display: grid;
      gap: 8px;
    }

    .day-header {
      display: flex;
      justify-content: space-between;
      font-weight: 600;
    }

    .summary-Positive .overall { color: var(--pos); }
    .summary-Negative .overall { color: var(--neg); }
    .summary-Neutral .overall { color: var(--neu); }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--neg);
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Self Rating</h1>
      <p class="subtitle">Rate your actions: <span id="date">{{DATE}}</span></p>
    </header>

    <section>
      <form id="rate-form" method="post" action="/rate">
        <div class="picker">
          <select id="action-select" name="description" aria-label="Action">
          <option value="">No description</option>
          {{ACTION_OPTIONS}}
          </select>
          <input id="custom-description" type="text" maxlength="200" placeholder="Or describe it yourself" />
        </div>
        <div class="rating-buttons" style="margin-top: 12px">
          {{RATING_BUTTONS}}
        </div>
      </form>
      <div class="undo-bar" id="undo-bar">
        <span>Rating saved.</span>
        <button type="button" id="undo-btn">Undo</button>
      </div>
      <div class="status" id="status"></div>
    </section>

    <section id="today">
      <h2>Today's Actions</h2>
      <p class="empty" id="today-empty">Nothing rated yet today.</p>
      <ul class="actions" id="today-list"></ul>
      <div class="counts" id="today-counts"></div>
      <div class="sum" id="today-sum"></div>
    </section>

    <section>
      <h2>Previous Days</h2>
      <p class="empty" id="history-empty">No previous actions yet.</p>
      <div id="history"></div>
    </section>
  </main>

  <script>
    const EMOJI = { '-1': '😞', '0': '😐', '1': '😊' };
    const LABEL = { '-1': 'Negative', '0': 'Neutral', '1': 'Positive' };

    const form = document.getElementById('rate-form');
    const selectEl = document.getElementById('action-select');
    const customEl = document.getElementById('custom-description');
    const undoBar = document.getElementById('undo-bar');
    const undoBtn = document.getElementById('undo-btn');
    const statusEl = document.getElementById('status');
    const todayList = document.getElementById('today-list');
    const todayEmpty = document.getElementById('today-empty');
    const todayCounts = document.getElementById('today-counts');
    const todaySum = document.getElementById('today-sum');
    const historyEl = document.getElementById('history');
    const historyEmpty = document.getElementById('history-empty');
    const dateEl = document.getElementById('date');

    let undoTimer = null;
    let undoEventId = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatTime = (iso) =>
      new Date(iso).toLocaleTimeString([], { hour: '2-digit', minute: '2-digit' });

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) node.className = className;
      if (text !== undefined) node.textContent = text;
      return node;
    };

    const renderCounts = (target, summary) => {
      target.replaceChildren(
        el('span', null, `😊 ${summary.positive} Positive`),
        el('span', null, `😐 ${summary.neutral} Neutral`),
        el('span', null, `😞 ${summary.negative} Negative`)
      );
    };

    const renderAction = (action, deletable) => {
      const item = el('li', `rating-${action.rating}`);
      const content = el('div');
      content.append(
        el('span', 'time', formatTime(action.timestamp)),
        el('span', null, `${EMOJI[action.rating]} ${LABEL[action.rating]}`)
      );
      if (action.description) {
        content.append(el('div', null, action.description));
      }
      item.append(content);
      if (deletable) {
        const del = el('button', 'delete', '✕');
        del.type = 'button';
        del.title = 'Delete this action';
        del.addEventListener('click', () => removeEvent(action.id).catch(fail));
        item.append(del);
      }
      return item;
    };

    const hideUndo = () => {
      if (undoTimer !== null) {
        clearTimeout(undoTimer);
        undoTimer = null;
      }
      undoEventId = null;
      undoBar.classList.remove('visible');
    };

    const showUndo = (eventId, windowMs) => {
      hideUndo();
      undoEventId = eventId;
      undoBar.classList.add('visible');
      undoTimer = setTimeout(hideUndo, windowMs);
    };

    const loadToday = async () => {
      const res = await fetch('/api/today');
      if (!res.ok) throw new Error('Unable to load today');
      const data = await res.json();
      dateEl.textContent = data.date;
      todayList.replaceChildren(...data.actions.map((a) => renderAction(a, true)));
      todayEmpty.hidden = data.actions.length > 0;
      renderCounts(todayCounts, data.summary);
      todaySum.textContent = data.actions.length ? `Sum: ${data.sum_expression}` : '';
      if (data.undo && undoEventId === null) {
        showUndo(data.undo.event_id, data.undo.remaining_ms);
      }
    };

    const loadHistory = async () => {
      const res = await fetch('/api/history');
      if (!res.ok) throw new Error('Unable to load history');
      const data = await res.json();
      historyEmpty.hidden = data.days.length > 0;
      historyEl.replaceChildren(...data.days.map((day) => {
        const wrap = el('div', `day summary-${day.summary.overall}`);
        const header = el('div', 'day-header');
        header.append(el('span', null, day.date), el('span', 'overall', `${day.summary.overall} Day`));
        const counts = el('div', 'counts');
        renderCounts(counts, day.summary);
        const details = el('details');
        const list = el('ul', 'actions');
        list.append(...day.actions.map((a) => renderAction(a, false)));
        details.append(el('summary', null, 'View all actions'), list);
        wrap.append(header, counts, el('div', 'sum', day.sum_expression), details);
        return wrap;
      }));
    };

    const refresh = () => Promise.all([loadToday(), loadHistory()]);
    const fail = (err) => setStatus(err.message, 'error');

    const removeEvent = async (id) => {
      const res = await fetch(`/api/events/${encodeURIComponent(id)}`, { method: 'DELETE' });
      if (!res.ok) throw new Error((await res.text()) || 'Delete failed');
      if (undoEventId === id) hideUndo();
      await refresh();
    };

    const send = async (rating) => {
      const description = customEl.value.trim() || selectEl.value || null;
      const res = await fetch('/api/events', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ rating, description })
      });
      if (!res.ok) throw new Error((await res.text()) || 'Request failed');
      const data = await res.json();
      customEl.value = '';
      setStatus('', '');
      showUndo(data.event.id, data.undo_window_ms);
      await refresh();
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const rating = Number(event.submitter ? event.submitter.value : 0);
      send(rating).catch(fail);
    });

    undoBtn.addEventListener('click', async () => {
      const id = undoEventId;
      hideUndo();
      if (id === null) return;
      try {
        const res = await fetch('/api/undo', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ id })
        });
        if (!res.ok) throw new Error('Undo failed');
        const data = await res.json();
        if (!data.undone) setStatus('Too late to undo.', 'info');
        await refresh();
      } catch (err) {
        fail(err);
      }
    });

    refresh().catch(fail);
  </script>
</body>
</html>
"#;
