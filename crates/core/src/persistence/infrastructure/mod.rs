pub mod text_file_sink;
