//! Inline HTML pages.
//!
//! The UI is deliberately thin: a login form and a dashboard shell that
//! drive the JSON API from the browser. Everything interesting lives behind
//! `/api/...`.

pub const LOGIN_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sign in - Passage</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #f3f4f6; display: flex;
               align-items: center; justify-content: center; min-height: 100vh; margin: 0; }
        .card { background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,.1);
                padding: 2rem; width: 320px; }
        h1 { font-size: 1.25rem; margin: 0 0 1rem; }
        label { display: block; font-size: .875rem; margin: .75rem 0 .25rem; color: #374151; }
        input { width: 100%; padding: .5rem; border: 1px solid #d1d5db; border-radius: 4px;
                box-sizing: border-box; }
        button { width: 100%; margin-top: 1.25rem; padding: .6rem; border: 0; border-radius: 4px;
                 background: #4f46e5; color: #fff; font-size: 1rem; cursor: pointer; }
        button:hover { background: #4338ca; }
        #message { color: #b91c1c; font-size: .875rem; min-height: 1.25rem; margin-top: .75rem; }
    </style>
</head>
<body>
    <div class="card">
        <h1>Passage Admin</h1>
        <form id="login-form">
            <label for="username">Username</label>
            <input type="text" id="username" name="username" required autofocus>
            <label for="password">Password</label>
            <input type="password" id="password" name="password" required>
            <button type="submit">Sign in</button>
            <div id="message"></div>
        </form>
    </div>
    <script>
        document.getElementById('login-form').addEventListener('submit', async (e) => {
            e.preventDefault();
            const res = await fetch('/login', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({
                    username: document.getElementById('username').value,
                    password: document.getElementById('password').value,
                }),
            });
            const data = await res.json();
            if (data.success) {
                window.location = '/dashboard';
            } else {
                document.getElementById('message').textContent = data.message;
            }
        });
    </script>
</body>
</html>"##;

pub const DASHBOARD_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dashboard - Passage</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #f3f4f6; margin: 0; }
        header { background: #4f46e5; color: #fff; padding: 1rem 1.5rem; display: flex;
                 justify-content: space-between; align-items: center; }
        header a { color: #e0e7ff; text-decoration: none; }
        main { padding: 1.5rem; }
        .tiles { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
                 gap: 1rem; margin-bottom: 1.5rem; }
        .tile { background: #fff; border-radius: 8px; padding: 1rem;
                box-shadow: 0 1px 3px rgba(0,0,0,.1); }
        .tile .label { font-size: .75rem; text-transform: uppercase; color: #6b7280; }
        .tile .value { font-size: 1.5rem; font-weight: 600; margin-top: .25rem; }
        table { width: 100%; background: #fff; border-collapse: collapse; border-radius: 8px;
                overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
        th, td { text-align: left; padding: .6rem .75rem; border-bottom: 1px solid #e5e7eb;
                 font-size: .875rem; }
        th { background: #f9fafb; color: #374151; }
    </style>
</head>
<body>
    <header>
        <strong>Passage Admin</strong>
        <a href="/logout">Log out</a>
    </header>
    <main>
        <div class="tiles" id="tiles"></div>
        <table>
            <thead>
                <tr><th>ID</th><th>Name</th><th>Phone</th><th>Country</th><th>Job role</th>
                    <th>Interview</th><th>Visa</th><th>Flying date</th></tr>
            </thead>
            <tbody id="clients"></tbody>
        </table>
    </main>
    <script>
        const TILES = [
            ['total_clients', 'Total clients'],
            ['interview_pending', 'Interview pending'],
            ['interview_passed', 'Interview passed'],
            ['visa_approved', 'Visa approved'],
            ['visa_processing', 'Visa processing'],
            ['ready_to_fly', 'Ready to fly'],
            ['total_revenue', 'Total revenue'],
        ];

        function esc(value) {
            const div = document.createElement('div');
            div.textContent = value == null ? '' : String(value);
            return div.innerHTML;
        }

        async function refresh() {
            const stats = await (await fetch('/api/stats')).json();
            document.getElementById('tiles').innerHTML = TILES.map(([key, label]) =>
                `<div class="tile"><div class="label">${label}</div>` +
                `<div class="value">${esc(stats[key])}</div></div>`).join('');

            const clients = await (await fetch('/api/clients')).json();
            document.getElementById('clients').innerHTML = clients.map(c =>
                `<tr><td>${c.id}</td><td>${esc(c.name)}</td><td>${esc(c.phone)}</td>` +
                `<td>${esc(c.country)}</td><td>${esc(c.job_role)}</td>` +
                `<td>${esc(c.interview_status)}</td><td>${esc(c.visa_status)}</td>` +
                `<td>${esc(c.flying_date)}</td></tr>`).join('');
        }

        refresh();
    </script>
</body>
</html>"##;
