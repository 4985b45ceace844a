//! The single-form HTML page.

/// Render the demo page.
pub fn render(title: &str) -> String {
    PAGE.replace("{{title}}", &escape(title))
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="wo">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{title}}</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
        label { display: block; font-weight: 600; margin: 1rem 0 0.25rem; }
        textarea { width: 100%; min-height: 6rem; font-size: 1rem; }
        audio { width: 100%; }
        #status { color: #b00020; min-height: 1.5rem; }
    </style>
</head>
<body>
    <h1>{{title}}</h1>
    <form id="tts-form">
        <label for="text">Texte en Wolof</label>
        <textarea id="text" name="text"></textarea>
        <button type="submit">Submit</button>
    </form>
    <label for="audio">Audio généré</label>
    <audio id="audio" controls></audio>
    <p id="status"></p>
    <script>
        const form = document.getElementById("tts-form");
        const status = document.getElementById("status");
        const player = document.getElementById("audio");
        form.addEventListener("submit", async (event) => {
            event.preventDefault();
            status.textContent = "";
            const text = document.getElementById("text").value;
            try {
                const response = await fetch("/api/predict", {
                    method: "POST",
                    headers: { "Content-Type": "application/json" },
                    body: JSON.stringify({ text }),
                });
                const body = await response.json();
                if (!response.ok) {
                    status.textContent = body.error || "Error";
                    return;
                }
                player.src = body.audio + "?t=" + Date.now();
                player.play();
            } catch (err) {
                status.textContent = "Error";
            }
        });
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_has_form_and_player() {
        let html = render("Wolof TTS for Tontetic");
        assert!(html.contains("<title>Wolof TTS for Tontetic</title>"));
        assert!(html.contains("Texte en Wolof"));
        assert!(html.contains("Audio généré"));
        assert!(!html.contains("{{title}}"));
    }

    #[test]
    fn test_render_escapes_title() {
        assert!(render("<b>").contains("&lt;b&gt;"));
    }
}
