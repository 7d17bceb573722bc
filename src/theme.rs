use crate::types::ThemeMode;

/// Palette for one theme, injected as an inline stylesheet. Layout lives in
/// the bundled stylesheet; only the `--color-*` values change between themes.
pub fn theme_css(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Dark => DARK_THEME,
        ThemeMode::Light => LIGHT_THEME,
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0b0f17;
    --color-bg-secondary: #111827;
    --color-bg-overlay: rgba(11, 15, 23, 0.92);
    --color-text-primary: #f9fafb;
    --color-text-muted: #9ca3af;
    --color-border: #1f2937;
    --color-surface-muted: #1b2433;
    --color-input-border: #2a3649;
    --color-input-bg: #0b0f17;
    --color-chat-user-bg: #3b82f6;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #111827;
    --color-chat-assistant-text: #f9fafb;
    --color-timestamp: #6b7280;
    --color-accent: #3b82f6;
    --color-accent-soft: rgba(59, 130, 246, 0.15);
    --color-success: #22c55e;
    --color-success-soft: rgba(34, 197, 94, 0.12);
    --color-danger: #ef4444;
    --color-danger-soft: rgba(239, 68, 68, 0.12);
    --color-shimmer-base: rgba(59, 130, 246, 0.25);
    --color-shimmer-highlight: #3b82f6;
    --color-header-fade: rgba(11, 15, 23, 0.88);
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.header { background: var(--color-bg-primary); }
.btn:hover,
.btn-ghost:hover { background: var(--color-surface-muted); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.composer textarea:focus { border-color: var(--color-accent); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f3f4f6;
    --color-bg-overlay: rgba(255, 255, 255, 0.92);
    --color-text-primary: #111827;
    --color-text-muted: #4b5563;
    --color-border: #d1d5db;
    --color-surface-muted: #e5e7eb;
    --color-input-border: #c4cbd6;
    --color-input-bg: #ffffff;
    --color-chat-user-bg: #2563eb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f3f4f6;
    --color-chat-assistant-text: #111827;
    --color-timestamp: #6b7280;
    --color-accent: #2563eb;
    --color-accent-soft: rgba(37, 99, 235, 0.12);
    --color-success: #16a34a;
    --color-success-soft: rgba(22, 163, 74, 0.12);
    --color-danger: #dc2626;
    --color-danger-soft: rgba(220, 38, 38, 0.1);
    --color-shimmer-base: rgba(37, 99, 235, 0.25);
    --color-shimmer-highlight: #2563eb;
    --color-header-fade: rgba(255, 255, 255, 0.9);
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.header { background: var(--color-bg-primary); }
.btn { color: var(--color-text-primary); }
.btn:hover,
.btn-ghost:hover { background: var(--color-surface-muted); }
.composer { background: var(--color-bg-overlay); border-top-color: var(--color-border); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.composer textarea:focus { border-color: var(--color-accent); }
"#;
