//! The single-page prediction form, served inline.

use axum::response::{Html, IntoResponse};

pub async fn serve_app() -> impl IntoResponse {
    Html(APP_HTML)
}

const APP_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Menu Profitability Predictor</title>
    <style>
        :root {
            --bg-dark: #0f172a;
            --bg-card: #1e293b;
            --text-primary: #f1f5f9;
            --text-secondary: #94a3b8;
            --accent: #3b82f6;
            --success: #22c55e;
            --danger: #ef4444;
        }
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;
            background: var(--bg-dark);
            color: var(--text-primary);
            min-height: 100vh;
        }
        .header {
            background: linear-gradient(135deg, #1e3a8a 0%, #7c3aed 100%);
            padding: 1.5rem 2rem;
        }
        .header h1 { font-size: 1.5rem; font-weight: 700; }
        .container { max-width: 640px; margin: 0 auto; padding: 2rem; }
        .card {
            background: var(--bg-card);
            border-radius: 12px;
            padding: 1.5rem;
            border: 1px solid rgba(255,255,255,0.1);
            margin-bottom: 1.5rem;
        }
        .card h2 { font-size: 1.1rem; margin-bottom: 1rem; }
        .field { margin-bottom: 1rem; }
        .field label { display: block; color: var(--text-secondary); font-size: 0.875rem; margin-bottom: 0.35rem; }
        select, input[type="number"] {
            width: 100%;
            background: #0f172a;
            border: 1px solid rgba(255,255,255,0.2);
            border-radius: 8px;
            padding: 0.6rem 0.8rem;
            color: white;
            font-size: 1rem;
        }
        .btn {
            padding: 0.6rem 1.2rem;
            border-radius: 6px;
            border: none;
            cursor: pointer;
            font-weight: 500;
            background: var(--accent);
            color: white;
            width: 100%;
            font-size: 1rem;
        }
        .btn:hover { opacity: 0.9; }
        .banner {
            border-radius: 8px;
            padding: 0.9rem 1rem;
            margin-bottom: 1rem;
            font-weight: 600;
        }
        .banner.ok { background: rgba(34,197,94,0.15); border: 1px solid var(--success); color: var(--success); }
        .banner.err { background: rgba(239,68,68,0.15); border: 1px solid var(--danger); color: var(--danger); }
        .score-line { display: flex; justify-content: space-between; padding: 0.3rem 0; color: var(--text-secondary); }
        .score-line .value { color: var(--text-primary); font-weight: 500; }
        .bar-row { margin: 0.5rem 0; }
        .bar-row .bar-label { font-size: 0.8rem; color: var(--text-secondary); margin-bottom: 0.2rem; }
        .bar-track { background: #0f172a; border-radius: 6px; height: 22px; overflow: hidden; }
        .bar-fill { background: var(--accent); height: 100%; border-radius: 6px; transition: width 0.4s; }
        #result { display: none; }
    </style>
</head>
<body>
    <div class="header"><h1>&#127869;&#65039; Menu Profitability Predictor</h1></div>
    <div class="container">
        <div class="card">
            <h2>Enter Menu Details</h2>
            <form id="prediction-form">
                <div class="field">
                    <label for="restaurant">Restaurant ID</label>
                    <select id="restaurant" required></select>
                </div>
                <div class="field">
                    <label for="category">Menu Category</label>
                    <select id="category" required></select>
                </div>
                <div class="field">
                    <label for="price">Price ($)</label>
                    <input type="number" id="price" min="0" step="0.01" value="0" required>
                </div>
                <div class="field">
                    <label for="ingredients">Number of Ingredients</label>
                    <input type="number" id="ingredients" min="1" step="1" value="1" required>
                </div>
                <div class="field">
                    <label for="name-length">Menu Item Name Length</label>
                    <input type="number" id="name-length" min="1" step="1" value="1" required>
                </div>
                <button type="submit" class="btn">Predict Profitability</button>
            </form>
        </div>
        <div class="card" id="result">
            <div id="banner"></div>
            <h2>Confidence Scores</h2>
            <div id="score-lines"></div>
            <div id="chart"></div>
        </div>
    </div>
    <script>
        function escapeHtml(text) {
            const div = document.createElement('div');
            div.textContent = text;
            return div.innerHTML;
        }

        async function loadSchema() {
            const res = await fetch('/api/schema');
            const schema = await res.json();
            const fill = (id, values) => {
                document.getElementById(id).innerHTML =
                    values.map(v => `<option value="${escapeHtml(v)}">${escapeHtml(v)}</option>`).join('');
            };
            fill('restaurant', schema.restaurants);
            fill('category', schema.categories);
        }

        async function submitPrediction(event) {
            event.preventDefault();
            const body = {
                restaurant_id: document.getElementById('restaurant').value,
                menu_category: document.getElementById('category').value,
                price: parseFloat(document.getElementById('price').value),
                ingredient_count: parseInt(document.getElementById('ingredients').value, 10),
                name_length: parseInt(document.getElementById('name-length').value, 10)
            };

            const res = await fetch('/api/predict', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body)
            });
            const data = await res.json();

            const banner = document.getElementById('banner');
            const lines = document.getElementById('score-lines');
            const chart = document.getElementById('chart');
            document.getElementById('result').style.display = 'block';

            if (!data.success) {
                banner.className = 'banner err';
                banner.textContent = data.message || 'Prediction failed';
                lines.innerHTML = '';
                chart.innerHTML = '';
                return;
            }

            banner.className = 'banner ok';
            banner.innerHTML = `Predicted Profitability: <strong>${escapeHtml(data.predicted_class)}</strong>`;

            lines.innerHTML = data.confidences.map(c =>
                `<div class="score-line"><span>${escapeHtml(c.class)}</span><span class="value">${escapeHtml(c.percent)}%</span></div>`
            ).join('');

            chart.innerHTML = data.confidences.map(c =>
                `<div class="bar-row">
                    <div class="bar-label">${escapeHtml(c.class)}</div>
                    <div class="bar-track"><div class="bar-fill" style="width:${(c.probability * 100).toFixed(1)}%"></div></div>
                </div>`
            ).join('');
        }

        document.getElementById('prediction-form').addEventListener('submit', submitPrediction);
        loadSchema();
    </script>
</body>
</html>
"#;
