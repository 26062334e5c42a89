//! Fallback HTML pages for unmatched resources.

/// 404 page shown when an addressed game does not exist, linking back to
/// its topic.
#[must_use]
pub fn game_not_found(topic: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Game Not Found</title>
</head>
<body>
  <main>
    <h1>Game Not Found</h1>
    <p>The requested game could not be found.</p>
    <a href="/topics/{topic}">Back to Topic</a>
  </main>
</body>
</html>
"#
    )
}

/// Generic 404 page for unmatched routes, linking home.
#[must_use]
pub fn page_not_found() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Page Not Found</title>
</head>
<body>
  <main>
    <h1>Page Not Found</h1>
    <p>The requested page could not be found.</p>
    <a href="/">Go Home</a>
  </main>
</body>
</html>
"#
    .to_owned()
}
