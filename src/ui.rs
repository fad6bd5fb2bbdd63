pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Nutrition Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef6ef;
      --bg-2: #cfe8d6;
      --ink: #24312a;
      --accent: #2e9e6b;
      --accent-2: #2f4858;
      --warn: #d98a2b;
      --low: #b24a3b;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4f2e7 60%, #f2f7ef 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 26px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
      gap: 12px;
      flex-wrap: wrap;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    .subtitle {
      margin: 0;
      color: #5d6b61;
      font-size: 0.95rem;
    }

    .panel {
      background: white;
      border-radius: 18px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .metric-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 14px;
    }

    .metric {
      background: white;
      border-radius: 16px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .metric .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #7d8a80;
    }

    .metric .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .bar {
      height: 8px;
      border-radius: 6px;
      background: #e8efe9;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      border-radius: 6px;
      background: var(--low);
      transition: width 300ms ease;
    }

    .bar.near span { background: var(--warn); }
    .bar.met span { background: var(--accent); }

    .percent {
      font-size: 0.8rem;
      color: #7d8a80;
    }

    form {
      display: grid;
      gap: 10px;
    }

    .row {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(120px, 1fr));
      gap: 10px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.8rem;
      color: #5d6b61;
    }

    input {
      border: 1px solid rgba(47, 72, 88, 0.18);
      border-radius: 10px;
      padding: 9px 10px;
      font: inherit;
    }

    button {
      border: 0;
      border-radius: 12px;
      padding: 11px 16px;
      font: inherit;
      font-weight: 600;
      color: white;
      background: var(--accent-2);
      cursor: pointer;
    }

    button.primary { background: var(--accent); }

    button:disabled {
      opacity: 0.5;
      cursor: default;
    }

    button.link {
      background: none;
      color: var(--accent-2);
      padding: 0;
      font-weight: 500;
      text-decoration: underline;
    }

    .meal {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 10px;
      padding: 10px 12px;
      border-radius: 12px;
      background: #f3f7f3;
      margin-bottom: 8px;
    }

    .meal .macros {
      font-size: 0.8rem;
      color: #7d8a80;
    }

    .date-group {
      border: 1px solid rgba(47, 72, 88, 0.1);
      border-radius: 14px;
      padding: 14px;
      margin-bottom: 12px;
    }

    .snapshot {
      background: #f3f7f3;
      border-radius: 12px;
      padding: 12px;
      margin-top: 10px;
    }

    .snapshot .when {
      font-size: 0.75rem;
      color: #7d8a80;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.85rem;
    }

    .status.error { color: var(--low); }
    .status.ok { color: var(--accent); }

    .hidden { display: none; }
  </style>
</head>
<body>
  <div class="app">
    <header>
      <div>
        <h1>Nutrition Tracker</h1>
        <p class="subtitle" id="greeting">{{DATE}}</p>
      </div>
      <button class="link hidden" id="logout">Log out</button>
    </header>

    <p class="status" id="status"></p>

    <section class="panel" id="login-panel">
      <h2>Log in</h2>
      <form id="login-form">
        <div class="row">
          <label>Email <input id="login-email" type="email" placeholder="you@example.com" /></label>
          <label>Password <input id="login-password" type="password" placeholder="anything" /></label>
        </div>
        <button class="primary" type="submit">Log in</button>
      </form>
    </section>

    <section class="hidden" id="client-panel">
      <div class="metric-grid" id="metrics"></div>

      <div class="panel" style="margin-top: 18px">
        <h2>Today's meals</h2>
        <div id="meal-list"></div>
        <form id="meal-form">
          <div class="row">
            <label>Name <input id="meal-name" placeholder="Lunch" /></label>
            <label>Calories <input id="meal-calories" placeholder="600" /></label>
            <label>Time <input id="meal-time" type="time" /></label>
          </div>
          <div class="row">
            <label>Protein (g) <input id="meal-protein" placeholder="0" /></label>
            <label>Carbs (g) <input id="meal-carbs" placeholder="0" /></label>
            <label>Fat (g) <input id="meal-fat" placeholder="0" /></label>
          </div>
          <button type="submit">Add meal</button>
        </form>
      </div>

      <div class="panel" style="margin-top: 18px">
        <h2>Update today</h2>
        <form id="day-form">
          <div class="row">
            <label>Calories <input id="day-calories" type="number" step="any" /></label>
            <label>Protein (g) <input id="day-protein" type="number" step="any" /></label>
            <label>Carbs (g) <input id="day-carbs" type="number" step="any" /></label>
          </div>
          <div class="row">
            <label>Fat (g) <input id="day-fat" type="number" step="any" /></label>
            <label>Water (ml) <input id="day-water" type="number" step="any" /></label>
            <label>Sleep (h) <input id="day-sleep" type="number" step="0.5" /></label>
          </div>
          <button type="submit">Save day</button>
        </form>
      </div>

      <div class="panel" style="margin-top: 18px">
        <h2>Daily goals</h2>
        <form id="goals-form">
          <div class="row">
            <label>Calories <input id="goal-calories" type="number" step="any" /></label>
            <label>Protein (g) <input id="goal-protein" type="number" step="any" /></label>
            <label>Carbs (g) <input id="goal-carbs" type="number" step="any" /></label>
          </div>
          <div class="row">
            <label>Fat (g) <input id="goal-fat" type="number" step="any" /></label>
            <label>Water (ml) <input id="goal-water" type="number" step="any" /></label>
            <label>Sleep (h) <input id="goal-sleep" type="number" step="0.5" /></label>
          </div>
          <button type="submit">Save goals</button>
        </form>
      </div>

      <div style="margin-top: 18px">
        <button class="primary" id="share">Share today with your coach</button>
      </div>
    </section>

    <section class="panel hidden" id="coach-panel">
      <h2>Shared client days</h2>
      <div id="coach-groups"></div>
    </section>
  </div>

  <script>
    const el = (id) => document.getElementById(id);
    const statusEl = el('status');

    const setStatus = (text, kind) => {
      statusEl.textContent = text;
      statusEl.className = `status ${kind || ''}`;
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      return res.json();
    };

    const post = (path, body) => api(path, {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body || {})
    });

    const put = (path, body) => api(path, {
      method: 'PUT',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body)
    });

    const num = (id) => parseFloat(el(id).value) || 0;

    const METRICS = [
      ['calories', 'Calories', 'kcal'],
      ['protein', 'Protein', 'g'],
      ['carbs', 'Carbs', 'g'],
      ['fat', 'Fat', 'g'],
      ['water', 'Water', 'ml'],
      ['sleep', 'Sleep', 'h']
    ];

    const renderMetric = (key, label, unit, value, progress) => {
      if (progress.kind === 'no_target') {
        return `<div class="metric">
          <span class="label">${label}</span>
          <span class="value">${value.toFixed(1)} ${unit}</span>
          <span class="percent">no target</span>
        </div>`;
      }
      return `<div class="metric">
        <span class="label">${label}</span>
        <span class="value">${value.toFixed(1)} ${unit}</span>
        <div class="bar ${progress.band}"><span style="width: ${(progress.ratio * 100).toFixed(0)}%"></span></div>
        <span class="percent">${progress.percent.toFixed(0)}% of goal</span>
      </div>`;
    };

    const renderMeals = (day) => {
      const list = el('meal-list');
      if (day.metrics.meals.length === 0) {
        list.innerHTML = '<p class="subtitle">No meals logged yet</p>';
        return;
      }
      list.innerHTML = day.metrics.meals.map((meal) => `
        <div class="meal">
          <div>
            <strong>${meal.name}</strong>
            <div class="macros">${meal.time} &middot; P ${meal.protein}g &middot; C ${meal.carbs}g &middot; F ${meal.fat}g</div>
          </div>
          <div>
            <strong>${meal.calories} kcal</strong>
            <button class="link" data-meal="${meal.id}">Delete</button>
          </div>
        </div>`).join('');

      list.querySelectorAll('button[data-meal]').forEach((button) => {
        button.addEventListener('click', () => {
          api(`/api/day/${today}/meals/${button.dataset.meal}`, { method: 'DELETE' })
            .then(renderDay)
            .catch((err) => setStatus(err.message, 'error'));
        });
      });
    };

    const today = '{{DATE}}';
    let session = null;

    const renderDay = (day) => {
      el('metrics').innerHTML = METRICS
        .map(([key, label, unit]) => renderMetric(key, label, unit, day.metrics[key], day.progress[key]))
        .join('');
      renderMeals(day);
      METRICS.forEach(([key]) => {
        el(`day-${key}`).value = day.metrics[key];
      });
      const share = el('share');
      share.disabled = day.is_shared;
      share.textContent = day.is_shared ? 'Shared with your coach' : 'Share today with your coach';
    };

    const renderGoals = (response) => {
      METRICS.forEach(([key]) => {
        el(`goal-${key}`).value = response.goals[key];
      });
    };

    const renderCoach = (groups) => {
      const container = el('coach-groups');
      if (groups.length === 0) {
        container.innerHTML = '<p class="subtitle">No shared data from clients yet</p>';
        return;
      }
      container.innerHTML = groups.map((group) => `
        <div class="date-group">
          <strong>${group.date}</strong>
          <span class="subtitle"> &middot; ${group.snapshots.length} client${group.snapshots.length === 1 ? '' : 's'}</span>
          ${group.snapshots.map((snap) => `
            <div class="snapshot">
              <strong>${snap.client_name}</strong>
              <span class="when">shared ${new Date(snap.shared_at).toLocaleTimeString()}</span>
              <div class="macros">
                ${snap.metrics.calories.toFixed(0)} kcal &middot;
                P ${snap.metrics.protein.toFixed(1)}g &middot;
                C ${snap.metrics.carbs.toFixed(1)}g &middot;
                F ${snap.metrics.fat.toFixed(1)}g &middot;
                ${(snap.metrics.water / 1000).toFixed(1)} L water &middot;
                ${snap.metrics.sleep.toFixed(1)} h sleep
              </div>
            </div>`).join('')}
        </div>`).join('');
    };

    const showForRole = () => {
      el('login-panel').classList.toggle('hidden', !!session);
      el('logout').classList.toggle('hidden', !session);
      el('client-panel').classList.toggle('hidden', !session || session.role === 'coach');
      el('coach-panel').classList.toggle('hidden', !session || session.role !== 'coach');
      el('greeting').textContent = session
        ? `Welcome back, ${session.name} — ${today}`
        : today;
    };

    const refresh = async () => {
      if (!session) {
        return;
      }
      if (session.role === 'coach') {
        renderCoach(await api('/api/coach/clients'));
        return;
      }
      renderDay(await api('/api/day/today'));
      renderGoals(await api('/api/goals'));
    };

    el('login-form').addEventListener('submit', (event) => {
      event.preventDefault();
      post('/api/login', {
        email: el('login-email').value,
        password: el('login-password').value
      }).then((user) => {
        session = user;
        showForRole();
        return refresh();
      }).then(() => setStatus('', ''))
        .catch((err) => setStatus(err.message, 'error'));
    });

    el('logout').addEventListener('click', () => {
      post('/api/logout').then(() => {
        session = null;
        showForRole();
      }).catch((err) => setStatus(err.message, 'error'));
    });

    el('meal-form').addEventListener('submit', (event) => {
      event.preventDefault();
      post(`/api/day/${today}/meals`, {
        name: el('meal-name').value,
        calories: el('meal-calories').value,
        protein: el('meal-protein').value,
        carbs: el('meal-carbs').value,
        fat: el('meal-fat').value,
        time: el('meal-time').value
      }).then((day) => {
        renderDay(day);
        el('meal-form').reset();
        setStatus('Meal added', 'ok');
      }).catch((err) => setStatus(err.message, 'error'));
    });

    el('day-form').addEventListener('submit', (event) => {
      event.preventDefault();
      put(`/api/day/${today}`, {
        calories: num('day-calories'),
        protein: num('day-protein'),
        carbs: num('day-carbs'),
        fat: num('day-fat'),
        water: num('day-water'),
        sleep: num('day-sleep')
      }).then((day) => {
        renderDay(day);
        setStatus('Saved', 'ok');
      }).catch((err) => setStatus(err.message, 'error'));
    });

    el('goals-form').addEventListener('submit', (event) => {
      event.preventDefault();
      put('/api/goals', {
        calories: num('goal-calories'),
        protein: num('goal-protein'),
        carbs: num('goal-carbs'),
        fat: num('goal-fat'),
        water: num('goal-water'),
        sleep: num('goal-sleep')
      }).then((response) => {
        renderGoals(response);
        return api('/api/day/today');
      }).then(renderDay)
        .then(() => setStatus('Goals saved', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    el('share').addEventListener('click', () => {
      post('/api/share').then(() => {
        setStatus('Shared with your coach', 'ok');
        return api('/api/day/today');
      }).then(renderDay)
        .catch((err) => setStatus(err.message, 'error'));
    });

    api('/api/session').then((response) => {
      session = response.user;
      showForRole();
      return refresh();
    }).catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
