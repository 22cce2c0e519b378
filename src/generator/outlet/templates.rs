//! Text of the files placed in an exported project

use serde_json::{Value, json};

use crate::types::export::ExportOptions;
use crate::types::variant::UIVariant;
use crate::utils::text::{escape_attribute, extract_body_content, html_to_jsx, slugify};

const PALETTE_ROLES: [&str; 5] = ["primary", "secondary", "background", "surface", "accent"];

/// npm package name for a variant
pub fn project_name(variant: &UIVariant) -> String {
    let slug = slugify(&variant.name);
    if slug.is_empty() {
        variant.id.clone()
    } else {
        slug
    }
}

fn pretty(value: Value) -> String {
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

pub fn index_html(variant: &UIVariant, options: &ExportOptions) -> String {
    let title = escape_attribute(options.title.as_deref().unwrap_or(&variant.name));
    let description =
        escape_attribute(options.description.as_deref().unwrap_or(&variant.description));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{description}">
    <meta name="author" content="Magic UI Elite">
    <title>{title}</title>

    <meta property="og:type" content="website">
    <meta property="og:title" content="{title}">
    <meta property="og:description" content="{description}">

    <meta property="twitter:card" content="summary_large_image">
    <meta property="twitter:title" content="{title}">
    <meta property="twitter:description" content="{description}">

    <link rel="icon" type="image/x-icon" href="/favicon.ico">
    <link rel="stylesheet" href="styles.css">

    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap" rel="stylesheet">
</head>
<body>
    {body}

    <script src="script.js"></script>
</body>
</html>
"#,
        title = title,
        description = description,
        body = extract_body_content(&variant.code.html).trim(),
    )
}

pub fn package_json(variant: &UIVariant) -> String {
    pretty(json!({
        "name": project_name(variant),
        "version": "1.0.0",
        "description": variant.description,
        "main": "index.html",
        "scripts": {
            "start": "npx serve .",
            "dev": "npx live-server .",
            "build": "echo \"Static build complete\"",
            "deploy": "vercel --prod"
        },
        "keywords": ["ui", "frontend", "magic-ui-elite", variant.style.theme],
        "author": "Magic UI Elite",
        "license": "MIT",
        "devDependencies": {
            "live-server": "^1.2.2",
            "serve": "^14.2.0"
        }
    }))
}

pub fn readme(variant: &UIVariant) -> String {
    let style = &variant.style;
    let palette: String = PALETTE_ROLES
        .iter()
        .filter_map(|role| style.colors.get(*role).map(|c| format!("- {}: `{}`\n", role, c)))
        .collect();
    let custom_properties: String = PALETTE_ROLES
        .iter()
        .filter_map(|role| style.colors.get(*role).map(|c| format!("    --{}: {};\n", role, c)))
        .collect();

    format!(
        r#"# {name}

{description}

## Quick Start

```bash
npm install
npm run dev
# or serve the folder directly
npx serve .
```

## Project Structure

```
{slug}/
├── index.html    # Main HTML file
├── styles.css    # Stylesheet
├── script.js     # JavaScript
├── package.json  # Project configuration
└── README.md     # This file
```

## Theme: {theme_name}

{theme_description}

### Color Palette
{palette}
## Customization

Update the CSS custom properties in `styles.css`:

```css
:root {{
{custom_properties}}}
```

The layout uses CSS Grid and Flexbox and adapts from 320px phones to large desktop screens.

## Deployment

- Vercel: `npm run deploy`
- Netlify: drag and drop the project folder
- GitHub Pages: push the folder and enable Pages for the branch

## License

MIT

Generated with Magic UI Elite.
"#,
        name = variant.name,
        description = variant.description,
        slug = project_name(variant),
        theme_name = style.name,
        theme_description = style.description,
        palette = palette,
        custom_properties = custom_properties,
    )
}

pub fn react_app(variant: &UIVariant) -> String {
    format!(
        r#"import React from 'react';
import './App.css';

function App() {{
  return (
    <div className="App">
      {}
    </div>
  );
}}

export default App;
"#,
        html_to_jsx(extract_body_content(&variant.code.html).trim())
    )
}

pub const REACT_INDEX: &str = r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';

const root = ReactDOM.createRoot(document.getElementById('root'));
root.render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
"#;

pub fn react_public_index(variant: &UIVariant) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <title>{}</title>\n</head>\n<body>\n    <div id=\"root\"></div>\n</body>\n</html>\n",
        escape_attribute(&variant.name)
    )
}

pub fn react_package_json(variant: &UIVariant) -> String {
    pretty(json!({
        "name": project_name(variant),
        "version": "0.1.0",
        "private": true,
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "react-scripts": "5.0.1"
        },
        "scripts": {
            "start": "react-scripts start",
            "build": "react-scripts build",
            "test": "react-scripts test",
            "eject": "react-scripts eject"
        }
    }))
}

pub fn vue_app(variant: &UIVariant) -> String {
    format!(
        r#"<template>
  <div id="app-root">
    {html}
  </div>
</template>

<script>
export default {{
  name: 'App',
  mounted() {{
    {js}
  }}
}}
</script>

<style>
{css}
</style>
"#,
        html = extract_body_content(&variant.code.html).trim(),
        js = variant.code.js,
        css = variant.code.css,
    )
}

pub const VUE_MAIN: &str = r#"import { createApp } from 'vue'
import App from './App.vue'

createApp(App).mount('#app')
"#;

pub const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite'
import vue from '@vitejs/plugin-vue'

export default defineConfig({
  plugins: [vue()],
})
"#;

pub fn vue_package_json(variant: &UIVariant) -> String {
    pretty(json!({
        "name": project_name(variant),
        "version": "0.0.0",
        "private": true,
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        },
        "dependencies": { "vue": "^3.3.0" },
        "devDependencies": {
            "@vitejs/plugin-vue": "^4.4.0",
            "vite": "^4.4.5"
        }
    }))
}

pub fn next_index(variant: &UIVariant) -> String {
    format!(
        r#"import Head from 'next/head'

export default function Home() {{
  return (
    <>
      <Head>
        <title>{title}</title>
        <meta name="description" content="{description}" />
        <meta name="viewport" content="width=device-width, initial-scale=1" />
        <link rel="icon" href="/favicon.ico" />
      </Head>
      <main>
        {body}
      </main>
    </>
  )
}}
"#,
        title = escape_attribute(&variant.name),
        description = escape_attribute(&variant.description),
        body = html_to_jsx(extract_body_content(&variant.code.html).trim()),
    )
}

pub const NEXT_APP: &str = r#"import '../styles/globals.css'

export default function App({ Component, pageProps }) {
  return <Component {...pageProps} />
}
"#;

pub const NEXT_CONFIG: &str = r#"/** @type {import('next').NextConfig} */
const nextConfig = {
  reactStrictMode: true,
}

module.exports = nextConfig
"#;

pub fn next_package_json(variant: &UIVariant) -> String {
    pretty(json!({
        "name": project_name(variant),
        "version": "0.1.0",
        "private": true,
        "scripts": {
            "dev": "next dev",
            "build": "next build",
            "start": "next start",
            "lint": "next lint"
        },
        "dependencies": {
            "next": "14.0.0",
            "react": "^18",
            "react-dom": "^18"
        },
        "devDependencies": {
            "eslint": "^8",
            "eslint-config-next": "14.0.0"
        }
    }))
}

pub fn vercel_json() -> String {
    pretty(json!({
        "version": 2,
        "builds": [{ "src": "package.json", "use": "@vercel/static-build" }]
    }))
}

pub const GITIGNORE: &str = "# Dependencies
node_modules/
npm-debug.log*
yarn-debug.log*
yarn-error.log*

# Build output
/build
/dist
/.next/
/out/

# Environment
.env
.env.local
.env.*.local

# Caches and logs
.cache
.parcel-cache
.eslintcache
coverage/
logs
*.log

# Editors
.vscode/*
!.vscode/extensions.json
.idea
.DS_Store
";

pub fn eslint_json() -> String {
    pretty(json!({
        "extends": ["next/core-web-vitals"],
        "rules": {
            "no-unused-vars": "warn",
            "no-console": "warn"
        }
    }))
}

pub const PRETTIER_CONFIG: &str = "module.exports = {
  semi: true,
  trailingComma: 'es5',
  singleQuote: true,
  printWidth: 80,
  tabWidth: 2,
};
";
