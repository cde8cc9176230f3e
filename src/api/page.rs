//! Embedded form page
//!
//! A single static document: text input, image picker, submit button, echoed
//! image and response region. The image echo happens client-side via an
//! object URL; only the solve endpoint touches the bytes.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>MathSolver</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
  h1 { font-size: 1.5rem; }
  label { display: block; margin-top: 1rem; font-weight: 600; }
  input[type="text"] { width: 100%; padding: 0.5rem; margin-top: 0.25rem; }
  button { margin-top: 1rem; padding: 0.5rem 1.5rem; }
  #preview { max-width: 100%; margin-top: 1rem; display: none; }
  #response { white-space: pre-wrap; background: #f6f6f6; padding: 1rem; margin-top: 1rem; border-radius: 4px; }
  .notice { color: #8a6d00; margin-top: 0.5rem; }
  .error { color: #a40000; margin-top: 0.5rem; }
</style>
</head>
<body>
<h1>MathSolver</h1>

<form id="solve-form">
  <label for="input">Input Prompt:</label>
  <input type="text" id="input" name="input" autocomplete="off">

  <label for="image">Choose an image...</label>
  <input type="file" id="image" name="image" accept=".jpg,.jpeg,.png">

  <img id="preview" alt="Uploaded image">

  <button type="submit">Get Explanation and Questions</button>
</form>

<div id="status"></div>
<h2 id="response-heading" hidden>The Response is</h2>
<div id="response" hidden></div>

<script>
const form = document.getElementById("solve-form");
const imageInput = document.getElementById("image");
const preview = document.getElementById("preview");
const status = document.getElementById("status");
const responseHeading = document.getElementById("response-heading");
const responseBox = document.getElementById("response");

imageInput.addEventListener("change", () => {
  const file = imageInput.files[0];
  if (file) {
    preview.src = URL.createObjectURL(file);
    preview.style.display = "block";
  } else {
    preview.style.display = "none";
  }
});

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  status.textContent = "";
  const data = new FormData(form);

  let res;
  try {
    res = await fetch("/api/v1/solve", { method: "POST", body: data });
  } catch (err) {
    status.innerHTML = '<p class="error">Request failed: ' + err + "</p>";
    return;
  }

  const body = await res.json();
  if (!res.ok) {
    status.innerHTML = '<p class="error">' + body.message + "</p>";
    return;
  }

  responseHeading.hidden = false;
  responseBox.hidden = false;
  responseBox.textContent = body.response;

  const notes = [];
  if (body.inference_error) notes.push("Error getting response from the model: " + body.inference_error);
  if (body.saved) notes.push("Response saved!");
  if (body.persistence_error) notes.push("Response could not be saved: " + body.persistence_error);
  status.innerHTML = notes.map(n => '<p class="notice">' + n + "</p>").join("");
});
</script>
</body>
</html>
"#;
