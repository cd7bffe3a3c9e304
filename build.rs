fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Message types are hand-written prost structs in src/proto.rs, so only
    // the service plumbing is generated here and protoc is not required.
    let log_store = tonic_build::manual::Service::builder()
        .name("LogStore")
        .package("msglog.v1")
        .method(
            tonic_build::manual::Method::builder()
                .name("log_message")
                .route_name("LogMessage")
                .input_type("crate::proto::LogRequest")
                .output_type("crate::proto::LogResponse")
                .codec_path("tonic::codec::ProstCodec")
                .build(),
        )
        .method(
            tonic_build::manual::Method::builder()
                .name("get_messages")
                .route_name("GetMessages")
                .input_type("crate::proto::Empty")
                .output_type("crate::proto::MessagesResponse")
                .codec_path("tonic::codec::ProstCodec")
                .build(),
        )
        .build();

    tonic_build::manual::Builder::new().compile(&[log_store]);
}
