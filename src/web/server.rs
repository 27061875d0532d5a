use axum::{response::Html, routing::get, Router};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::{api, AppState};

pub async fn start_dashboard_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/health", get(api::health_check))
        .route("/api/analysis", get(api::get_analysis))
        .route("/api/news", get(api::get_news))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Dashboard server starting on http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>MarketPulse Dashboard</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #f4f6f8;
            color: #1f2933;
            padding: 24px;
        }
        h1 { font-size: 22px; margin-bottom: 4px; }
        .caption { color: #6b7280; margin-bottom: 20px; }
        .controls { display: flex; gap: 8px; margin-bottom: 20px; }
        .controls input, .controls select {
            padding: 8px 10px; border: 1px solid #d1d5db; border-radius: 6px; font-size: 14px;
        }
        .controls button {
            padding: 8px 16px; border: none; border-radius: 6px;
            background: #2563eb; color: white; font-size: 14px; cursor: pointer;
        }
        .metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin-bottom: 20px; }
        .tile {
            background: white; border-radius: 8px; padding: 14px;
            box-shadow: 0 1px 2px rgba(0,0,0,0.06);
        }
        .tile .name { font-size: 12px; color: #6b7280; text-transform: uppercase; }
        .tile .value { font-size: 20px; font-weight: 600; margin-top: 4px; }
        .tile .delta { font-size: 13px; margin-top: 2px; }
        .cards { display: grid; grid-template-columns: repeat(3, 1fr); gap: 12px; margin-bottom: 20px; }
        .card {
            background: white; border-radius: 8px; padding: 14px;
            box-shadow: 0 1px 2px rgba(0,0,0,0.06);
        }
        .card .kind { font-size: 12px; color: #6b7280; text-transform: uppercase; }
        .card .status { font-size: 16px; font-weight: 700; margin: 6px 0; }
        .card .desc { font-size: 13px; color: #4b5563; }
        .charts { display: grid; grid-template-columns: 1fr; gap: 16px; margin-bottom: 20px; }
        .panel {
            background: white; border-radius: 8px; padding: 16px;
            box-shadow: 0 1px 2px rgba(0,0,0,0.06);
        }
        .panel h3 { font-size: 14px; margin-bottom: 10px; }
        #warning {
            display: none; background: #fef3c7; color: #92400e;
            padding: 10px 14px; border-radius: 6px; margin-bottom: 16px;
        }
        #news .item { padding: 8px 0; border-bottom: 1px solid #e5e7eb; }
        #news .item a { color: #2563eb; text-decoration: none; font-size: 14px; }
        #news .item .meta { font-size: 12px; color: #9ca3af; margin-top: 2px; }
    </style>
</head>
<body>
    <h1 id="title">MarketPulse</h1>
    <div class="caption" id="caption">Strategic Intelligence Dashboard</div>

    <div class="controls">
        <input id="symbol" value="NVDA" placeholder="Ticker symbol">
        <select id="period">
            <option value="3mo">3 months</option>
            <option value="6mo" selected>6 months</option>
            <option value="1y">1 year</option>
            <option value="5y">5 years</option>
        </select>
        <button onclick="refresh()">Refresh Analysis</button>
    </div>

    <div id="warning">Insufficient data for full trend analysis.</div>

    <div class="metrics">
        <div class="tile"><div class="name">Asset Price</div><div class="value" id="price">–</div><div class="delta" id="change"></div></div>
        <div class="tile"><div class="name">Market Cap</div><div class="value" id="mcap">–</div></div>
        <div class="tile"><div class="name">Beta (Risk)</div><div class="value" id="beta">–</div></div>
        <div class="tile"><div class="name">Volatility (14d)</div><div class="value" id="vol">–</div></div>
    </div>

    <div class="cards" id="cards" style="display:none">
        <div class="card"><div class="kind">Structural Trend</div><div class="status" id="trend-status"></div><div class="desc" id="trend-desc"></div></div>
        <div class="card"><div class="kind">Market Sentiment</div><div class="status" id="sent-status"></div><div class="desc" id="sent-desc"></div></div>
        <div class="card"><div class="kind">Volatility Profile</div><div class="status" id="risk-status"></div><div class="desc" id="risk-desc"></div></div>
    </div>

    <div class="charts">
        <div class="panel"><h3 id="price-title">Price vs Trend</h3><canvas id="priceChart" height="90"></canvas></div>
        <div class="panel"><h3>Sentiment Index (RSI)</h3><canvas id="momentumChart" height="60"></canvas></div>
    </div>

    <div class="panel">
        <h3 id="news-title">Contextual Drivers</h3>
        <div id="news"></div>
    </div>

    <script>
        let priceChart = null;
        let momentumChart = null;

        function num(v) { return v === null || v === undefined ? null : parseFloat(v); }

        async function refresh() {
            const symbol = document.getElementById('symbol').value.trim().toUpperCase();
            const period = document.getElementById('period').value;
            if (!symbol) return;

            const resp = await fetch(`/api/analysis?symbol=${encodeURIComponent(symbol)}&period=${period}`);
            if (!resp.ok) {
                const err = await resp.json().catch(() => ({ error: 'request failed' }));
                document.getElementById('caption').textContent = err.error || 'Data unavailable. Check ticker symbol.';
                return;
            }
            const data = await resp.json();
            render(symbol, data);
            loadNews(symbol);
        }

        function render(symbol, data) {
            document.getElementById('title').textContent = symbol + ' Strategic Overview';
            document.getElementById('caption').textContent =
                data.profile.long_name + ' | Sector: ' + data.profile.sector;

            const snap = data.snapshot;
            document.getElementById('price').textContent = '$' + num(snap.current_price).toFixed(2);
            const changeEl = document.getElementById('change');
            if (snap.change_pct !== null) {
                const pct = num(snap.change_pct);
                changeEl.textContent = (pct >= 0 ? '+' : '') + pct.toFixed(2) + '%';
                changeEl.style.color = pct >= 0 ? '#09AB3B' : '#FF4B4B';
            } else {
                changeEl.textContent = '';
            }
            document.getElementById('mcap').textContent = data.market_cap_display;
            document.getElementById('beta').textContent = num(data.profile.beta).toFixed(2);
            document.getElementById('vol').textContent =
                snap.volatility !== null ? num(snap.volatility).toFixed(2) + '%' : 'N/A';

            const warning = document.getElementById('warning');
            const cards = document.getElementById('cards');
            if (data.assessment) {
                warning.style.display = 'none';
                cards.style.display = 'grid';
                setCard('trend', data.assessment.trend);
                setCard('sent', data.assessment.sentiment);
                setCard('risk', data.assessment.risk);
            } else {
                warning.style.display = 'block';
                cards.style.display = 'none';
            }

            drawCharts(symbol, data);
        }

        function setCard(prefix, card) {
            const status = document.getElementById(prefix + '-status');
            status.textContent = card.label;
            status.style.color = card.color;
            document.getElementById(prefix + '-desc').textContent = card.description;
        }

        function drawCharts(symbol, data) {
            const labels = data.dates;
            const close = data.close.map(num);
            const sma = data.sma.map(num);
            const momentum = data.momentum.map(num);
            const heated = labels.map(() => num(data.reference.heated));
            const depressed = labels.map(() => num(data.reference.depressed));

            document.getElementById('price-title').textContent = symbol + ' Price vs Trend';

            if (priceChart) priceChart.destroy();
            priceChart = new Chart(document.getElementById('priceChart'), {
                type: 'line',
                data: {
                    labels,
                    datasets: [
                        { label: 'Close', data: close, borderColor: '#2563eb', pointRadius: 0, borderWidth: 2 },
                        { label: 'Baseline Trend', data: sma, borderColor: 'orange', pointRadius: 0, borderWidth: 2 }
                    ]
                },
                options: { animation: false, spanGaps: false, scales: { x: { ticks: { maxTicksLimit: 10 } } } }
            });

            if (momentumChart) momentumChart.destroy();
            momentumChart = new Chart(document.getElementById('momentumChart'), {
                type: 'line',
                data: {
                    labels,
                    datasets: [
                        { label: 'RSI Sentiment', data: momentum, borderColor: '#636EFA', pointRadius: 0, borderWidth: 2 },
                        { label: 'Heated (70)', data: heated, borderColor: 'red', borderDash: [4, 4], pointRadius: 0, borderWidth: 1 },
                        { label: 'Value (30)', data: depressed, borderColor: 'green', borderDash: [4, 4], pointRadius: 0, borderWidth: 1 }
                    ]
                },
                options: {
                    animation: false,
                    spanGaps: false,
                    scales: {
                        y: { min: 0, max: 100 },
                        x: { ticks: { maxTicksLimit: 10 } }
                    }
                }
            });
        }

        async function loadNews(symbol) {
            document.getElementById('news-title').textContent = 'Contextual Drivers: ' + symbol;
            const container = document.getElementById('news');
            container.innerHTML = '';
            const resp = await fetch(`/api/news?symbol=${encodeURIComponent(symbol)}`);
            if (!resp.ok) return;
            const data = await resp.json();
            if (!data.items.length) {
                container.textContent = 'No specific news drivers found.';
                return;
            }
            for (const item of data.items) {
                const div = document.createElement('div');
                div.className = 'item';
                const a = document.createElement('a');
                a.href = item.link;
                a.target = '_blank';
                a.textContent = item.title;
                const meta = document.createElement('div');
                meta.className = 'meta';
                meta.textContent = item.source + ' • ' + item.published;
                div.appendChild(a);
                div.appendChild(meta);
                container.appendChild(div);
            }
        }

        refresh();
    </script>
</body>
</html>"##;
