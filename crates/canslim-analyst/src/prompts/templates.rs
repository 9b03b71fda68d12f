//! Prompt template sources

/// General CANSLIM candidate discovery
pub const CANDIDATES: &str = r#"Act as a stock market expert specializing in William J. O'Neil's CANSLIM methodology (4th Edition).
Identify 8 Indian stocks (NSE/BSE) that are currently exhibiting strong CANSLIM characteristics.

Prioritize:
1. **High Relative Strength (RS)**: Stocks outperforming the Nifty 50 and near 52-week highs.
2. **Mid-cap and Small-cap Growth**: O'Neil emphasizes these often produce the biggest gains. Look for companies like Force Motors, Trent, Dixon, etc., if they fit the criteria.
3. **Chart Patterns**: Stocks emerging from sound bases (Cup with Handle, Double Bottom, Flat Base, High Tight Flag).
4. **Volume**: Look for volume spikes during breakouts.

Use Google Search to verify recent price action, volume anomalies, and quarterly earnings acceleration.

Return the result strictly as a JSON object with this structure:
{
  "candidates": [
    { "symbol": "SYMBOL", "reason": "Brief reason: e.g., Breakout from cup with handle on 2x volume." },
    ...
  ]
}
"#;

/// Discovery of stocks trading near their 52-week high
pub const NEAR_HIGHS: &str = r#"Act as a stock market expert specializing in Indian markets (NSE/BSE).
Identify 8 Indian stocks that are currently trading within 25% of their 52-week highs.

Criteria:
1. **Proximity Rule**: Current Price must be >= 75% of the 52-Week High.
2. **Momentum**: Prefer stocks in an uptrend or consolidating sideways (not crashing).
3. **Data**: Use Google Search to get real-time price data.

Return the result strictly as a JSON object with this structure:
{
  "candidates": [
    { "symbol": "SYMBOL", "reason": "Trading at ₹2400, 52W High is ₹2500 (4% away). Strong momentum." },
    ...
  ]
}
"#;

/// Seven-criterion analysis of a single symbol
pub const ANALYSIS: &str = r#"Act as a strict CANSLIM analyst based on William J. O'Neil's "How to Make Money in Stocks" (4th Edition).
Perform a detailed analysis for the Indian stock "{{ symbol }}" (NSE/BSE).
Use Google Search to find latest quarterly reports, annual financial statements, chart patterns, and market data.

Evaluate the following 7 criteria rigorously:

1. C (Current Earnings): Is the most recent quarterly EPS up >25% YoY? Is the growth rate accelerating (e.g., 10% -> 20% -> 35%)?
2. A (Annual Earnings): Has annual earnings growth been positive in *each* of the last 3 years? Is ROE > 17%?
3. N (New/Chart Pattern): Is there a new product/service/management/high? Is the stock breaking out of a specific base (Cup w/ Handle, Double Bottom, Flat Base, High Tight Flag) at a proper pivot point?
4. S (Supply/Demand): Is volume drying up in consolidation and spiking (>40% above avg) on breakout? Is float relatively low?
5. L (Leader): Is the RS (Relative Strength) Rating effectively >80? Is it trading near 52-week highs? Is it a leader in its industry group?
6. I (Institutional): Is institutional sponsorship increasing in the last few quarters? Are top-quality funds buying?
7. M (Market): Is the general market (Nifty 50/Sensex) in a "Confirmed Uptrend"?

For each, determine PASS/FAIL/NEUTRAL and provide a concise technical/fundamental finding.

Extract the last 5 quarters of EPS growth % (Year-over-Year) if available.

Return the response strictly as a JSON object:
{
  "symbol": "{{ symbol | upper }}",
  "companyName": "Full Company Name",
  "currentPrice": "Current price with currency",
  "canslimScore": number (0-100),
  "criteria": {
{%- for letter in letters %}
    "{{ letter }}": { "status": "PASS"|"FAIL"|"NEUTRAL", "finding": "..." }{% if not loop.last %},{% endif %}
{%- endfor %}
  },
  "summary": "Brief buy/sell/watch recommendation based on the rules.",
  "epsTrend": [
    { "quarter": "Q3 24", "value": 25.5 },
    ...
  ]
}
"#;
