//! HTML pages.
//!
//! Every value interpolated into markup goes through [`escape`]; every value
//! placed in a URL path goes through [`path_segment`].

use std::fmt::Write;

use crate::student::{Student, StudentForm};
use crate::validation::ValidationErrors;

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Percent-encode `text` as a single URL path segment.
pub fn path_segment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<nav>
<a href="/">Home</a> | <a href="/profile">Profile</a> | <a href="/mahasiswa">Mahasiswa</a>
</nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

/// Landing page over a fixed list of (name, class) pairs.
pub fn home(samples: &[(&str, &str)]) -> String {
    let mut body = String::from("<h1>Daftar Mahasiswa</h1>\n<ul>\n");
    for (name, class_name) in samples {
        let _ = writeln!(
            body,
            "<li>{} - Kelas {}</li>",
            escape(name),
            escape(class_name)
        );
    }
    body.push_str("</ul>");
    layout("Home", &body)
}

pub fn profile() -> String {
    layout("Profile", "<h1>Halaman Profile</h1>")
}

/// Student list with any pending notices above it.
pub fn student_list(students: &[Student], notices: &[String]) -> String {
    let mut body = String::from("<h1>Data Mahasiswa</h1>\n");

    for notice in notices {
        let _ = writeln!(
            body,
            r#"<div class="alert" role="alert">{}</div>"#,
            escape(notice)
        );
    }

    body.push_str(r#"<p><a href="/mahasiswa/tambah">Tambah Data Mahasiswa</a></p>"#);
    body.push('\n');

    if students.is_empty() {
        body.push_str(r#"<p class="empty">Data Mahasiswa Kosong</p>"#);
        return layout("Mahasiswa", &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>#</th><th>Nama</th><th>NIM</th><th>Kelas</th><th>Aksi</th></tr></thead>\n<tbody>\n",
    );
    for (i, student) in students.iter().enumerate() {
        let _ = writeln!(
            body,
            r#"<tr><td>{no}</td><td>{name}</td><td>{nim}</td><td>{class_name}</td><td><a href="/mahasiswa/{seg}">Detail</a> <a href="/mahasiswa/edit/{seg}">Edit</a> {delete}</td></tr>"#,
            no = i + 1,
            name = escape(&student.name),
            nim = escape(&student.nim),
            class_name = escape(&student.class_name),
            seg = path_segment(&student.nim),
            delete = delete_form(&student.nim),
        );
    }
    body.push_str("</tbody>\n</table>");

    layout("Mahasiswa", &body)
}

fn delete_form(nim: &str) -> String {
    format!(
        r#"<form action="/mahasiswa?_method=DELETE" method="post" class="inline"><input type="hidden" name="nim" value="{}"><button type="submit">Hapus</button></form>"#,
        escape(nim)
    )
}

fn error_list(errors: &ValidationErrors) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"errors\" role=\"alert\">\n<ul>\n");
    for error in errors {
        let _ = writeln!(out, "<li>{}</li>", escape(&error.message));
    }
    out.push_str("</ul>\n</div>\n");
    out
}

fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<p><label for="{name}">{label}</label> <input type="text" id="{name}" name="{name}" value="{value}"></p>
"#,
        name = name,
        label = label,
        value = escape(value),
    )
}

fn student_fields(form: &StudentForm) -> String {
    let mut out = text_input("nama", "Nama", &form.name);
    out.push_str(&text_input("nim", "NIM", &form.nim));
    out.push_str(&text_input("kelas", "Kelas", &form.class_name));
    out
}

/// Create form, pre-filled with `form` (the submitted values after a rejection).
pub fn create_form(form: &StudentForm, errors: &ValidationErrors) -> String {
    let body = format!(
        r#"<h1>Form Tambah Data Mahasiswa</h1>
{errors}<form action="/mahasiswa" method="post">
{fields}<button type="submit">Tambah Data</button>
</form>"#,
        errors = error_list(errors),
        fields = student_fields(form),
    );
    layout("Tambah Mahasiswa", &body)
}

/// Edit form. Carries the record id and the nim it had when editing began.
pub fn edit_form(form: &StudentForm, errors: &ValidationErrors) -> String {
    let old_nim = form.old_nim.as_deref().unwrap_or(&form.nim);
    let body = format!(
        r#"<h1>Form Ubah Data Mahasiswa</h1>
{errors}<form action="/mahasiswa?_method=PUT" method="post">
<input type="hidden" name="_id" value="{id}">
<input type="hidden" name="oldNim" value="{old_nim}">
{fields}<button type="submit">Ubah Data</button>
</form>"#,
        errors = error_list(errors),
        id = escape(form.id.as_deref().unwrap_or_default()),
        old_nim = escape(old_nim),
        fields = student_fields(form),
    );
    layout("Edit Mahasiswa", &body)
}

pub fn detail(student: &Student) -> String {
    let body = format!(
        r#"<h1>Detail Mahasiswa</h1>
<dl>
<dt>Nama</dt><dd>{name}</dd>
<dt>NIM</dt><dd>{nim}</dd>
<dt>Kelas</dt><dd>{class_name}</dd>
</dl>
<p><a href="/mahasiswa/edit/{seg}">Edit</a> {delete}</p>
<p><a href="/mahasiswa">Kembali ke daftar mahasiswa</a></p>"#,
        name = escape(&student.name),
        nim = escape(&student.nim),
        class_name = escape(&student.class_name),
        seg = path_segment(&student.nim),
        delete = delete_form(&student.nim),
    );
    layout("Detail Mahasiswa", &body)
}
